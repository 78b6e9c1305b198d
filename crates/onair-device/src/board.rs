use async_trait::async_trait;

use crate::error::Result;

/// The remote device-control API consumed by the indicator.
///
/// This is the whole contract: resolve a pin by name, set its PWM frequency,
/// set its duty cycle. Connection and session management stay behind the
/// implementor; [`crate::sim::SimBoard`] provides an in-process stand-in.
#[async_trait]
pub trait Board: Send + Sync {
    async fn gpio_pin_by_name(&self, name: &str) -> Result<Box<dyn GpioPin>>;
}

/// A single PWM-capable pin on the board.
#[async_trait]
pub trait GpioPin: Send + Sync {
    async fn set_pwm_frequency(&self, hz: u32) -> Result<()>;

    /// Set the duty cycle. Callers guarantee `duty` lies in `[0, 1]`
    /// (enforced upstream by [`onair_core::Color`]).
    async fn set_pwm(&self, duty: f64) -> Result<()>;
}
