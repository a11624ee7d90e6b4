//! Sensor information returned by Open

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Sensor information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorInfo {
    /// Firmware version
    pub firmware_version: u32,

    /// Maximum ISO area size
    pub iso_area_max_size: u32,

    /// Raw serial number bytes
    pub serial_number: [u8; 16],
}

impl SensorInfo {
    /// Encoded size of the info payload
    pub const SIZE: usize = 24;

    pub fn new(firmware_version: u32, iso_area_max_size: u32, serial_number: [u8; 16]) -> Self {
        Self {
            firmware_version,
            iso_area_max_size,
            serial_number,
        }
    }

    /// Parse the info payload (little-endian, 24 bytes)
    ///
    /// # Examples
    ///
    /// ```
    /// use gt511_types::SensorInfo;
    ///
    /// let mut payload = [0u8; SensorInfo::SIZE];
    /// payload[0] = 0x12;
    /// let info = SensorInfo::from_payload(&payload).unwrap();
    /// assert_eq!(info.firmware_version, 0x12);
    /// ```
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() != Self::SIZE {
            return Err(Error::PayloadLength {
                expected: Self::SIZE,
                actual: payload.len(),
            });
        }

        let mut serial_number = [0u8; 16];
        serial_number.copy_from_slice(&payload[8..24]);

        Ok(Self {
            firmware_version: LittleEndian::read_u32(&payload[0..4]),
            iso_area_max_size: LittleEndian::read_u32(&payload[4..8]),
            serial_number,
        })
    }

    /// Serial number as lowercase hex
    pub fn serial_hex(&self) -> String {
        hex::encode(self.serial_number)
    }
}

impl fmt::Display for SensorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sensor[SN: {}, FW: 0x{:08X}, ISO max: {}]",
            self.serial_hex(),
            self.firmware_version,
            self.iso_area_max_size
        )
    }
}
