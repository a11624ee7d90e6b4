//! Driver configuration

use gt511_core::constants::DEFAULT_SLOT_COUNT;

/// Sensor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorConfig {
    /// Number of template slots; valid ids are `0..slot_count`
    pub slot_count: u32,
}

impl SensorConfig {
    pub fn new(slot_count: u32) -> Self {
        Self { slot_count }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_COUNT)
    }
}
