//! Sensor error codes
//!
//! The hardware reports failures by answering a command with a NACK whose
//! parameter field carries one of the values below. The driver adds a single
//! local code, [`ErrorCode::Other`], for everything the sensor did not report
//! itself (transport failure, malformed frame, invalid argument).

/// Error code returned by every driver operation
///
/// Hardware values are kept verbatim, obsolete ones included, so that
/// firmware variants keep working. Values the driver does not know by name
/// are carried in [`ErrorCode::Unknown`] with their original number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorCode {
    /// Obsolete: timeout during capture
    #[error("TIMEOUT")]
    Timeout,

    /// Obsolete: invalid baud rate
    #[error("INVALID_BAUDRATE")]
    InvalidBaudrate,

    /// Slot index out of range
    #[error("INVALID_POS")]
    InvalidPos,

    /// Slot is not in use
    #[error("IS_NOT_USED")]
    IsNotUsed,

    /// Slot is already in use
    #[error("IS_ALREADY_USED")]
    IsAlreadyUsed,

    /// Sensor-side communication error
    #[error("COMM_ERR")]
    CommErr,

    #[error("VERIFY_FAILED")]
    VerifyFailed,

    #[error("IDENTIFY_FAILED")]
    IdentifyFailed,

    #[error("DB_IS_FULL")]
    DbIsFull,

    #[error("DB_IS_EMPTY")]
    DbIsEmpty,

    /// Obsolete: bad enrollment order
    #[error("TURN_ERR")]
    TurnErr,

    #[error("BAD_FINGER")]
    BadFinger,

    #[error("ENROLL_FAILED")]
    EnrollFailed,

    /// Command not supported by this firmware
    #[error("IS_NOT_SUPPORTED")]
    IsNotSupported,

    /// Hardware device error
    #[error("DEV_ERR")]
    DevErr,

    /// Obsolete: capture cancelled
    #[error("CAPTURE_CANCELED")]
    CaptureCanceled,

    #[error("INVALID_PARAM")]
    InvalidParam,

    #[error("FINGER_IS_NOT_PRESSED")]
    FingerIsNotPressed,

    /// Driver-local failure (not reported by the sensor)
    #[error("OTHER_ERROR")]
    Other,

    /// Hardware value without a known name
    #[error("UNKNOWN(0x{0:04X})")]
    Unknown(u32),
}

impl ErrorCode {
    /// Wire value meaning "no error"
    pub const NONE: u32 = 0;

    /// Wire value of the driver-local error
    pub const OTHER: u32 = 0xFFFF;

    /// Interpret a NACK parameter
    ///
    /// Returns `None` for [`ErrorCode::NONE`]. Every other value maps to an
    /// error code; unrecognized values are preserved in
    /// [`ErrorCode::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gt511_types::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::from_raw(0x1004), Some(ErrorCode::IsNotUsed));
    /// assert_eq!(ErrorCode::from_raw(0x2000), Some(ErrorCode::Unknown(0x2000)));
    /// assert_eq!(ErrorCode::from_raw(0), None);
    /// ```
    pub fn from_raw(value: u32) -> Option<Self> {
        let code = match value {
            Self::NONE => return None,
            0x1001 => Self::Timeout,
            0x1002 => Self::InvalidBaudrate,
            0x1003 => Self::InvalidPos,
            0x1004 => Self::IsNotUsed,
            0x1005 => Self::IsAlreadyUsed,
            0x1006 => Self::CommErr,
            0x1007 => Self::VerifyFailed,
            0x1008 => Self::IdentifyFailed,
            0x1009 => Self::DbIsFull,
            0x100A => Self::DbIsEmpty,
            0x100B => Self::TurnErr,
            0x100C => Self::BadFinger,
            0x100D => Self::EnrollFailed,
            0x100E => Self::IsNotSupported,
            0x100F => Self::DevErr,
            0x1010 => Self::CaptureCanceled,
            0x1011 => Self::InvalidParam,
            0x1012 => Self::FingerIsNotPressed,
            Self::OTHER => Self::Other,
            other => Self::Unknown(other),
        };
        Some(code)
    }

    /// Numeric value as carried on the wire
    pub fn raw(self) -> u32 {
        match self {
            Self::Timeout => 0x1001,
            Self::InvalidBaudrate => 0x1002,
            Self::InvalidPos => 0x1003,
            Self::IsNotUsed => 0x1004,
            Self::IsAlreadyUsed => 0x1005,
            Self::CommErr => 0x1006,
            Self::VerifyFailed => 0x1007,
            Self::IdentifyFailed => 0x1008,
            Self::DbIsFull => 0x1009,
            Self::DbIsEmpty => 0x100A,
            Self::TurnErr => 0x100B,
            Self::BadFinger => 0x100C,
            Self::EnrollFailed => 0x100D,
            Self::IsNotSupported => 0x100E,
            Self::DevErr => 0x100F,
            Self::CaptureCanceled => 0x1010,
            Self::InvalidParam => 0x1011,
            Self::FingerIsNotPressed => 0x1012,
            Self::Other => Self::OTHER,
            Self::Unknown(value) => value,
        }
    }

    /// Mnemonic name, `"UNKNOWN"` for unrecognized values
    pub fn name(self) -> &'static str {
        match self {
            Self::Timeout => "TIMEOUT",
            Self::InvalidBaudrate => "INVALID_BAUDRATE",
            Self::InvalidPos => "INVALID_POS",
            Self::IsNotUsed => "IS_NOT_USED",
            Self::IsAlreadyUsed => "IS_ALREADY_USED",
            Self::CommErr => "COMM_ERR",
            Self::VerifyFailed => "VERIFY_FAILED",
            Self::IdentifyFailed => "IDENTIFY_FAILED",
            Self::DbIsFull => "DB_IS_FULL",
            Self::DbIsEmpty => "DB_IS_EMPTY",
            Self::TurnErr => "TURN_ERR",
            Self::BadFinger => "BAD_FINGER",
            Self::EnrollFailed => "ENROLL_FAILED",
            Self::IsNotSupported => "IS_NOT_SUPPORTED",
            Self::DevErr => "DEV_ERR",
            Self::CaptureCanceled => "CAPTURE_CANCELED",
            Self::InvalidParam => "INVALID_PARAM",
            Self::FingerIsNotPressed => "FINGER_IS_NOT_PRESSED",
            Self::Other => "OTHER_ERROR",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    /// Check if the sensor reported this error (as opposed to the driver)
    pub fn is_hardware(self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Check if the datasheet lists this code as no longer produced
    pub fn is_obsolete(self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::InvalidBaudrate | Self::TurnErr | Self::CaptureCanceled
        )
    }
}
