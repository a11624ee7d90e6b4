//! # gt511
//!
//! Rust driver for GT-511C serial fingerprint sensors.
//!
//! ## Features
//!
//! - Type-safe command/response protocol
//! - Identify, verify and enroll workflows with press/release prompts
//! - Pluggable transport and host (UI + timeout) capabilities
//! - Hardware error codes preserved verbatim
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use gt511::{DeadlineHost, SerialTransport, Sensor};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut transport = SerialTransport::new("/dev/ttyUSB0", 9600);
//!     transport.open()?;
//!
//!     let host = DeadlineHost::new(Duration::from_secs(10));
//!     let mut sensor = Sensor::new(transport, host);
//!
//!     if let Some(info) = sensor.open(true)? {
//!         println!("{}", info);
//!     }
//!
//!     let id = sensor.run_identify()?;
//!     println!("Matched slot {}", id);
//!
//!     sensor.close()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod sensor;
pub mod slots;
pub mod touch;
pub mod workflow;

// Re-exports
pub use config::SensorConfig;
pub use error::Result;
pub use host::{DeadlineHost, Host};
pub use sensor::{CaptureQuality, EnrollStep, Sensor};
pub use workflow::{Abort, DeviceOp, EnrollPhase, Phase};

// Re-export types
pub use gt511_core::{Command, Packet, Reply};
pub use gt511_transport::{SerialTransport, Transport};
pub use gt511_types::{ErrorCode, Mode, SensorInfo, UiEvent};
