//! GT-511C data packets
//!
//! Data packets share the command packet's start bytes and device id but
//! carry a variable payload followed by a 16-bit checksum. The driver only
//! receives one: the sensor info sent after an Open that asked for it.

use bytes::{BufMut, BytesMut};
use tracing::trace;

use gt511_types::SensorInfo;

use crate::{
    checksum,
    constants::{DEVICE_ID, START_CODE_1, START_CODE_2},
    error::{Error, Result},
};

/// Data packet framing helpers
///
/// ```text
/// ┌─────────┬─────────┬──────────┬─────────────┬──────────┐
/// │ Start 1 │ Start 2 │ DeviceID │   Payload   │ Checksum │
/// │  0x55   │  0xAA   │ 2 bytes  │   N bytes   │ 2 bytes  │
/// └─────────┴─────────┴──────────┴─────────────┴──────────┘
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DataPacket;

impl DataPacket {
    /// Start bytes plus device id
    pub const HEADER_SIZE: usize = 4;

    /// Trailing checksum
    pub const CHECKSUM_SIZE: usize = 2;

    /// Size of the data packet carrying [`SensorInfo`]
    pub const SENSOR_INFO_SIZE: usize = Self::size_for(SensorInfo::SIZE);

    /// Total packet size for a payload of `payload_len` bytes
    pub const fn size_for(payload_len: usize) -> usize {
        Self::HEADER_SIZE + payload_len + Self::CHECKSUM_SIZE
    }

    /// Encode a data packet around `payload`
    pub fn encode(payload: &[u8]) -> BytesMut {
        let mut buf = BytesMut::with_capacity(Self::size_for(payload.len()));

        buf.put_u8(START_CODE_1);
        buf.put_u8(START_CODE_2);
        buf.put_u16_le(DEVICE_ID);
        buf.put_slice(payload);

        let checksum = checksum::calculate(&buf);
        buf.put_u16_le(checksum);

        buf
    }

    /// Payload bytes of a data packet (header and checksum stripped)
    pub fn payload(buf: &[u8]) -> Result<&[u8]> {
        let min = Self::size_for(0);
        if buf.len() < min {
            return Err(Error::FrameLength {
                expected: min,
                actual: buf.len(),
            });
        }

        Ok(&buf[Self::HEADER_SIZE..buf.len() - Self::CHECKSUM_SIZE])
    }

    /// Check the trailing checksum
    ///
    /// The driver does not reject data packets on this result; it is
    /// exposed for diagnostics only.
    pub fn checksum_matches(buf: &[u8]) -> bool {
        if buf.len() < Self::size_for(0) {
            return false;
        }

        let split = buf.len() - Self::CHECKSUM_SIZE;
        let received = u16::from_le_bytes([buf[split], buf[split + 1]]);
        checksum::verify(&buf[..split], received)
    }

    /// Decode the sensor info data packet
    ///
    /// Only the exact length is validated. Start bytes, device id and
    /// checksum are not checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use gt511_core::DataPacket;
    ///
    /// let mut payload = [0u8; 24];
    /// payload[4] = 0x40;
    /// let encoded = DataPacket::encode(&payload);
    ///
    /// let info = DataPacket::decode_sensor_info(&encoded).unwrap();
    /// assert_eq!(info.iso_area_max_size, 0x40);
    /// ```
    pub fn decode_sensor_info(buf: &[u8]) -> Result<SensorInfo> {
        if buf.len() != Self::SENSOR_INFO_SIZE {
            return Err(Error::FrameLength {
                expected: Self::SENSOR_INFO_SIZE,
                actual: buf.len(),
            });
        }

        trace!("Sensor info packet: {}", hex::encode(buf));

        Ok(SensorInfo::from_payload(Self::payload(buf)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn info_payload() -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&0x0001_0203u32.to_le_bytes());
        payload.extend_from_slice(&0x0000_4000u32.to_le_bytes());
        payload.extend_from_slice(b"0123456789ABCDEF");
        payload
    }

    #[test]
    fn test_sensor_info_size() {
        assert_eq!(DataPacket::SENSOR_INFO_SIZE, 30);
    }

    #[test]
    fn test_decode_sensor_info() {
        let encoded = DataPacket::encode(&info_payload());
        assert!(DataPacket::checksum_matches(&encoded));

        let info = DataPacket::decode_sensor_info(&encoded).unwrap();
        assert_eq!(info.firmware_version, 0x0001_0203);
        assert_eq!(info.iso_area_max_size, 0x4000);
        assert_eq!(&info.serial_number, b"0123456789ABCDEF");
    }

    #[test]
    fn test_bad_checksum_still_decodes() {
        let mut encoded = DataPacket::encode(&info_payload());
        encoded[29] ^= 0xFF;

        assert!(!DataPacket::checksum_matches(&encoded));
        assert!(DataPacket::decode_sensor_info(&encoded).is_ok());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let encoded = DataPacket::encode(&info_payload());

        assert!(matches!(
            DataPacket::decode_sensor_info(&encoded[..29]),
            Err(Error::FrameLength { expected: 30, actual: 29 })
        ));
    }

    #[test]
    fn test_payload_too_short() {
        assert!(DataPacket::payload(&[0x55, 0xAA]).is_err());
        assert!(!DataPacket::checksum_matches(&[0x55]));
    }
}
