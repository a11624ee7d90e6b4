//! High-level error handling
//!
//! Driver operations fail with an [`ErrorCode`]. Codec and transport
//! failures have no hardware code; they collapse into [`ErrorCode::Other`]
//! once their cause has been logged.

use std::fmt;

use gt511_core::Command;
use gt511_types::ErrorCode;
use tracing::warn;

pub type Result<T> = std::result::Result<T, ErrorCode>;

/// Collapse a local failure into [`ErrorCode::Other`]
pub(crate) trait OrLocal<T> {
    fn or_local(self, command: Command) -> Result<T>;
}

impl<T, E: fmt::Display> OrLocal<T> for std::result::Result<T, E> {
    fn or_local(self, command: Command) -> Result<T> {
        self.map_err(|e| {
            warn!("{} failed locally: {}", command, e);
            ErrorCode::Other
        })
    }
}
