//! GT-511C command/response packet encoding and validation

use bytes::{Buf, BufMut, BytesMut};
use std::fmt;

use crate::{
    checksum,
    command::{Command, Response},
    constants::{DEVICE_ID, START_CODE_1, START_CODE_2},
    error::{Error, Result},
};

/// GT-511C command/response packet
///
/// # Packet Structure
///
/// ```text
/// ┌─────────┬─────────┬──────────┬───────────┬───────────┬──────────┐
/// │ Start 1 │ Start 2 │ DeviceID │ Parameter │  Command  │ Checksum │
/// │  0x55   │  0xAA   │ 2 bytes  │  4 bytes  │  2 bytes  │ 2 bytes  │
/// └─────────┴─────────┴──────────┴───────────┴───────────┴──────────┘
/// ```
///
/// All multi-byte values are little-endian. The checksum is the 16-bit sum
/// of the ten bytes before it. In a response the command field holds
/// [`Response::Ack`] or [`Response::Nack`].
///
/// # Examples
///
/// ```
/// use gt511_core::{Command, Packet};
///
/// let packet = Packet::new(Command::CmosLed, 1);
/// let encoded = packet.encode();
/// assert_eq!(encoded.len(), Packet::SIZE);
///
/// let decoded = Packet::decode(&encoded).unwrap();
/// assert_eq!(decoded, packet);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    /// Command or response code
    pub code: u16,

    /// Command parameter or response output
    pub parameter: u32,
}

impl Packet {
    /// Encoded packet size in bytes
    pub const SIZE: usize = 12;

    /// Offset of the checksum field
    pub const CHECKSUM_OFFSET: usize = 10;

    /// Create a command packet
    pub fn new(command: Command, parameter: u32) -> Self {
        Self::from_raw(command.into(), parameter)
    }

    /// Create a response packet
    pub fn response(response: Response, parameter: u32) -> Self {
        Self::from_raw(response.into(), parameter)
    }

    /// Create a packet with an arbitrary code
    pub fn from_raw(code: u16, parameter: u32) -> Self {
        Self { code, parameter }
    }

    /// Encode packet to bytes
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(Self::SIZE);

        buf.put_u8(START_CODE_1);
        buf.put_u8(START_CODE_2);
        buf.put_u16_le(DEVICE_ID);
        buf.put_u32_le(self.parameter);
        buf.put_u16_le(self.code);

        let checksum = checksum::calculate(&buf);
        buf.put_u16_le(checksum);

        buf
    }

    /// Decode a packet, validating its framing
    ///
    /// Checks size, checksum, start bytes and device id. The code field is
    /// not interpreted; see [`Reply::decode`] for responses.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Buffer is not exactly [`Packet::SIZE`] bytes
    /// - Checksum verification fails
    /// - Start bytes are not `0x55 0xAA`
    /// - Device id is not 1
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() != Self::SIZE {
            return Err(Error::FrameLength {
                expected: Self::SIZE,
                actual: buf.len(),
            });
        }

        let mut cursor = buf;
        let start = [cursor.get_u8(), cursor.get_u8()];
        let device_id = cursor.get_u16_le();
        let parameter = cursor.get_u32_le();
        let code = cursor.get_u16_le();
        let checksum_received = cursor.get_u16_le();

        let checksum_calculated = checksum::calculate(&buf[..Self::CHECKSUM_OFFSET]);
        if checksum_calculated != checksum_received {
            return Err(Error::ChecksumMismatch {
                expected: checksum_calculated,
                received: checksum_received,
            });
        }

        if start != [START_CODE_1, START_CODE_2] {
            return Err(Error::BadStartCode(start));
        }

        if device_id != DEVICE_ID {
            return Err(Error::BadDeviceId(device_id));
        }

        Ok(Self { code, parameter })
    }

    /// Interpret the code field as a command
    pub fn command(&self) -> Result<Command> {
        Command::try_from(self.code)
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("code", &format!("0x{:04X}", self.code))
            .field("parameter", &format!("0x{:08X}", self.parameter))
            .finish()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.command() {
            Ok(command) => write!(f, "Packet[{}](param={})", command, self.parameter),
            Err(_) => write!(f, "Packet[0x{:04X}](param={})", self.code, self.parameter),
        }
    }
}

/// Validated response packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Command succeeded; carries the output parameter
    Ack(u32),

    /// Command failed; carries the sensor's error code
    Nack(u32),
}

impl Reply {
    /// Decode and validate a response packet
    ///
    /// On top of [`Packet::decode`], requires the code field to be ACK or
    /// NACK. Any violation rejects the whole frame.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let packet = Packet::decode(buf)?;

        match Response::try_from(packet.code)? {
            Response::Ack => Ok(Self::Ack(packet.parameter)),
            Response::Nack => Ok(Self::Nack(packet.parameter)),
        }
    }

    /// Check whether `buf` is a valid response packet
    pub fn is_valid(buf: &[u8]) -> bool {
        Self::decode(buf).is_ok()
    }

    pub fn response(self) -> Response {
        match self {
            Self::Ack(_) => Response::Ack,
            Self::Nack(_) => Response::Nack,
        }
    }

    pub fn parameter(self) -> u32 {
        match self {
            Self::Ack(parameter) | Self::Nack(parameter) => parameter,
        }
    }

    /// Encode as a response packet
    pub fn encode(self) -> BytesMut {
        Packet::response(self.response(), self.parameter()).encode()
    }
}
