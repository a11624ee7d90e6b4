//! Protocol constants

/// First start byte of every command and response packet
pub const START_CODE_1: u8 = 0x55;

/// Second start byte of every command and response packet
pub const START_CODE_2: u8 = 0xAA;

/// Device id; the sensor only answers to id 1
pub const DEVICE_ID: u16 = 1;

/// Number of template slots on the standard module
pub const DEFAULT_SLOT_COUNT: u32 = 20;

/// Baud rate the sensor uses after power-on
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Open parameter requesting the device info data packet
pub const OPEN_WITH_INFO: u32 = 1;

/// Capture parameter selecting high quality (used for enrollment)
pub const CAPTURE_HIGH_QUALITY: u32 = 1;
