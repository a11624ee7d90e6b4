//! # gt511-core
//!
//! Core protocol implementation for GT-511C fingerprint sensors.
//!
//! This crate provides the low-level protocol primitives:
//! - Command/response packet encoding and validation
//! - Checksum calculation
//! - Command and response codes
//! - Data packet handling for the Open device info
//! - Protocol constants

pub mod checksum;
pub mod command;
pub mod constants;
pub mod data_packet;
pub mod error;
pub mod packet;

pub use command::{Command, Response};
pub use data_packet::DataPacket;
pub use error::{Error, Result};
pub use packet::{Packet, Reply};
