pub mod actor;
pub mod board;
pub mod error;
pub mod indicator;
pub mod sim;

pub use actor::{ActuationHandle, ActuationTask};
pub use board::{Board, GpioPin};
pub use error::{DeviceError, Result};
pub use indicator::Indicator;
