//! Type definitions for gt511

pub mod error;
pub mod error_code;
pub mod mode;
pub mod sensor_info;

pub use error::{Error, Result};
pub use error_code::ErrorCode;
pub use mode::{Mode, UiEvent};
pub use sensor_info::SensorInfo;
