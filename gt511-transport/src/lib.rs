//! Transport layer for the GT-511C protocol
//!
//! The driver exchanges fixed-size frames through the [`Transport`] trait.
//! [`SerialTransport`] implements it over a serial port.

pub mod error;
pub mod serial;

pub use error::{Error, Result};
pub use serial::SerialTransport;

/// Byte transport to the sensor
///
/// Calls are blocking. One frame is sent, then one frame is received; the
/// driver never issues overlapping calls.
pub trait Transport: Send {
    /// Send all of `data`
    ///
    /// Any error is terminal for the current transaction.
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Fill `buf` with exactly `buf.len()` bytes
    ///
    /// Returns the number of bytes actually read. The driver treats any
    /// count other than `buf.len()` as a failed transaction.
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Human-readable endpoint name for logs
    fn name(&self) -> String;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).receive(buf)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).receive(buf)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}
