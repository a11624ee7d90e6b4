//! Template slot allocation

use tracing::{debug, trace, warn};

use gt511_transport::Transport;
use gt511_types::ErrorCode;

use crate::error::Result;
use crate::host::Host;
use crate::sensor::Sensor;

impl<T: Transport, H: Host> Sensor<T, H> {
    /// Find the lowest free slot
    ///
    /// Scans `0..slot_count` in order with check-enrolled and stops at the
    /// first slot the sensor reports as [`ErrorCode::IsNotUsed`]. Nothing is
    /// cached; every call rescans from 0.
    ///
    /// # Errors
    ///
    /// - [`ErrorCode::InvalidPos`] when every slot is used
    /// - any other error from check-enrolled, which stops the scan
    pub fn find_available(&mut self) -> Result<u32> {
        debug!("Scanning {} slots", self.config().slot_count);

        for slot in 0..self.config().slot_count {
            match self.check_enrolled(slot) {
                Err(ErrorCode::IsNotUsed) => {
                    debug!(slot, "Found free slot");
                    return Ok(slot);
                }
                Ok(()) => trace!(slot, "Slot in use"),
                Err(err) => {
                    warn!(slot, "Slot scan failed: {}", err);
                    return Err(err);
                }
            }
        }

        Err(ErrorCode::InvalidPos)
    }
}
