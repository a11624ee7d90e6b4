//! Driver modes and user-interface events

use std::fmt;

/// What the driver is doing when it notifies the host or arms a timeout
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    Idle,
    Identify,
    Verify,
    Capture,
    Enroll,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Identify => "identify",
            Self::Verify => "verify",
            Self::Capture => "capture",
            Self::Enroll => "enroll",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Notification sent to the host during a workflow
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UiEvent {
    /// User should press the sensor
    Press,

    /// User should lift the finger
    Release,

    /// Waiting for press or release timed out
    Timeout,

    /// Fingerprint accepted
    Accept,

    /// Fingerprint rejected by the sensor
    Reject,

    /// Processing error
    Error,
}

impl fmt::Display for UiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Press => "press",
            Self::Release => "release",
            Self::Timeout => "timeout",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}
