//! GT-511C command and response codes

use std::fmt;

use crate::error::{Error, Result};

/// Protocol command codes
///
/// Commands the driver issues. Each maps to exactly one request/response
/// transaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Command {
    // Session
    Open = 0x01,
    Close = 0x02,

    // Illumination
    CmosLed = 0x12,

    // Database
    GetEnrollCount = 0x20,
    CheckEnrolled = 0x21,
    EnrollStart = 0x22,
    Enroll1 = 0x23,
    Enroll2 = 0x24,
    Enroll3 = 0x25,
    IsPressFinger = 0x26,
    DeleteId = 0x40,
    DeleteAll = 0x41,

    // Matching
    Verify = 0x50,
    Identify = 0x51,

    // Capture
    CaptureFinger = 0x60,
}

impl Command {
    /// Check if this command changes the template database
    pub fn is_database_write(self) -> bool {
        matches!(
            self,
            Self::EnrollStart
                | Self::Enroll1
                | Self::Enroll2
                | Self::Enroll3
                | Self::DeleteId
                | Self::DeleteAll
        )
    }

    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::Open => "CMD_OPEN",
            Self::Close => "CMD_CLOSE",
            Self::CmosLed => "CMD_CMOS_LED",
            Self::GetEnrollCount => "CMD_GET_ENROLL_COUNT",
            Self::CheckEnrolled => "CMD_CHECK_ENROLLED",
            Self::EnrollStart => "CMD_ENROLL_START",
            Self::Enroll1 => "CMD_ENROLL1",
            Self::Enroll2 => "CMD_ENROLL2",
            Self::Enroll3 => "CMD_ENROLL3",
            Self::IsPressFinger => "CMD_IS_PRESS_FINGER",
            Self::DeleteId => "CMD_DELETE_ID",
            Self::DeleteAll => "CMD_DELETE_ALL",
            Self::Verify => "CMD_VERIFY",
            Self::Identify => "CMD_IDENTIFY",
            Self::CaptureFinger => "CMD_CAPTURE_FINGER",
        }
    }
}

impl From<Command> for u16 {
    fn from(cmd: Command) -> u16 {
        cmd as u16
    }
}

impl TryFrom<u16> for Command {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0x01 => Ok(Self::Open),
            0x02 => Ok(Self::Close),
            0x12 => Ok(Self::CmosLed),
            0x20 => Ok(Self::GetEnrollCount),
            0x21 => Ok(Self::CheckEnrolled),
            0x22 => Ok(Self::EnrollStart),
            0x23 => Ok(Self::Enroll1),
            0x24 => Ok(Self::Enroll2),
            0x25 => Ok(Self::Enroll3),
            0x26 => Ok(Self::IsPressFinger),
            0x40 => Ok(Self::DeleteId),
            0x41 => Ok(Self::DeleteAll),
            0x50 => Ok(Self::Verify),
            0x51 => Ok(Self::Identify),
            0x60 => Ok(Self::CaptureFinger),
            _ => Err(Error::UnknownCommand(value)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u16)
    }
}

/// Response codes carried in the command field of a response packet
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Response {
    Ack = 0x30,
    Nack = 0x31,
}

impl From<Response> for u16 {
    fn from(response: Response) -> u16 {
        response as u16
    }
}

impl TryFrom<u16> for Response {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0x30 => Ok(Self::Ack),
            0x31 => Ok(Self::Nack),
            _ => Err(Error::UnknownResponse(value)),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ack => f.write_str("ACK"),
            Self::Nack => f.write_str("NACK"),
        }
    }
}
