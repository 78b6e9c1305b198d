use std::time::Duration;

use onair_core::Color;
use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::board::{Board, GpioPin};
use crate::error::{DeviceError, Result};

/// Bound on each individual pin write. The upstream sender delivers events
/// at-least-once, so a timed-out write is dropped rather than retried.
const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

struct Channel {
    name: String,
    pin: Box<dyn GpioPin>,
}

struct Channels {
    pins: [Channel; 3],
    current: Color,
}

/// The RGB indicator: three pin handles in fixed red/green/blue order plus
/// the last commanded colour, guarded by one mutex so every colour command
/// is a single logical step. Concurrent commands serialize; none ever
/// observes or produces a mix of two colours across channels.
pub struct Indicator {
    inner: Mutex<Channels>,
}

impl std::fmt::Debug for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indicator").finish_non_exhaustive()
    }
}

impl Indicator {
    /// Resolve the three named pins (red, green, blue) and configure the
    /// uniform PWM frequency on each. Any unresolvable pin is a fatal
    /// [`DeviceError::Init`].
    pub async fn setup(
        board: &dyn Board,
        pin_names: &[String; 3],
        frequency_hz: u32,
    ) -> Result<Self> {
        let mut pins = Vec::with_capacity(3);
        for name in pin_names {
            let pin = board
                .gpio_pin_by_name(name)
                .await
                .map_err(|e| DeviceError::Init(format!("pin '{name}': {e}")))?;
            pin.set_pwm_frequency(frequency_hz).await?;
            pins.push(Channel {
                name: name.clone(),
                pin,
            });
        }
        let pins: [Channel; 3] = pins
            .try_into()
            .unwrap_or_else(|_| unreachable!("exactly three pins resolved"));
        Ok(Self {
            inner: Mutex::new(Channels {
                pins,
                current: Color::IDLE,
            }),
        })
    }

    /// Write all three duty cycles under the mutation lock.
    ///
    /// A failed or timed-out write propagates to the caller; the commanded
    /// colour is only recorded once every channel took its value.
    pub async fn set_color(&self, color: Color) -> Result<()> {
        let mut channels = self.inner.lock().await;
        for (channel, duty) in channels.pins.iter().zip(color.channels()) {
            timeout(WRITE_TIMEOUT, channel.pin.set_pwm(duty))
                .await
                .map_err(|_| DeviceError::Timeout {
                    pin: channel.name.clone(),
                })??;
        }
        channels.current = color;
        Ok(())
    }

    /// The last colour every channel successfully took.
    pub async fn current_color(&self) -> Color {
        self.inner.lock().await.current
    }

    /// Force the idle colour. Called once at shutdown.
    pub async fn close(&self) -> Result<()> {
        self.set_color(Color::IDLE).await
    }
}
