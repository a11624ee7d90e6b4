//! Error types for gt511-core

/// Result type alias for gt511-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame does not have the exact expected size
    #[error("Frame length mismatch: expected {expected} bytes, got {actual} bytes")]
    FrameLength {
        expected: usize,
        actual: usize,
    },

    /// Checksum verification failed
    #[error("Checksum mismatch: expected 0x{expected:04X}, received 0x{received:04X}")]
    ChecksumMismatch {
        expected: u16,
        received: u16,
    },

    /// Start bytes are not 0x55 0xAA
    #[error("Bad start code: {0:02X?}")]
    BadStartCode([u8; 2]),

    /// Device id is not 1
    #[error("Bad device id: {0}")]
    BadDeviceId(u16),

    /// Response field is neither ACK nor NACK
    #[error("Unknown response code: 0x{0:04X}")]
    UnknownResponse(u16),

    /// Unknown command code
    #[error("Unknown command code: 0x{0:04X}")]
    UnknownCommand(u16),

    /// Device info payload could not be parsed
    #[error("Invalid sensor info: {0}")]
    SensorInfo(#[from] gt511_types::Error),
}
