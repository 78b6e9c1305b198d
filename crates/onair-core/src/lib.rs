pub mod challenge;
pub mod color;
pub mod config;
pub mod error;
pub mod event;

pub use color::Color;
pub use config::Config;
pub use error::{OnAirError, Result};
