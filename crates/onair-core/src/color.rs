use crate::error::{OnAirError, Result};

/// An RGB colour command expressed as three PWM duty cycles in `[0, 1]`,
/// ordered red, green, blue.
///
/// The indicator is wired with inverted duty logic: `Color::IDLE`, the
/// all-ones triple, is the visually *off* state, not white.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
}

impl Color {
    /// Hardware "off" state (inverted wiring — full duty on every channel).
    pub const IDLE: Color = Color {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
    };

    /// Shown while the configured participant is in a meeting.
    pub const MAGENTA: Color = Color {
        red: 1.0,
        green: 0.0,
        blue: 1.0,
    };

    /// Shown after the configured participant leaves.
    pub const GREEN: Color = Color {
        red: 0.0,
        green: 1.0,
        blue: 0.0,
    };

    /// Shown while a meeting is running.
    pub const CYAN: Color = Color {
        red: 0.0,
        green: 1.0,
        blue: 1.0,
    };

    /// Build a colour from three duty cycles, rejecting any channel
    /// outside `[0, 1]` before it can reach the device API.
    pub fn new(red: f64, green: f64, blue: f64) -> Result<Self> {
        for channel in [red, green, blue] {
            if !(0.0..=1.0).contains(&channel) || channel.is_nan() {
                return Err(OnAirError::ChannelOutOfRange(channel));
            }
        }
        Ok(Color { red, green, blue })
    }

    /// Duty cycles in pin order: red, green, blue.
    pub fn channels(self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }
}
