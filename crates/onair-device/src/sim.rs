//! In-process board simulator.
//!
//! Stands in for the remote board wherever a live connection is unavailable:
//! unit and integration tests assert against its write log, and the CLI's
//! local mode uses it to trace pin writes instead of driving hardware.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::board::{Board, GpioPin};
use crate::error::{DeviceError, Result};

/// One successful duty-cycle write, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub struct PinWrite {
    pub pin: String,
    pub duty: f64,
}

#[derive(Default)]
struct SimState {
    writes: Vec<PinWrite>,
    frequencies: Vec<(String, u32)>,
    missing: HashSet<String>,
    failing: HashSet<String>,
}

/// A board whose pins record writes in memory.
///
/// Clones share the same log, so a test can keep one clone for assertions
/// while the indicator owns the other.
#[derive(Clone, Default)]
pub struct SimBoard {
    state: Arc<Mutex<SimState>>,
}

impl SimBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `gpio_pin_by_name` fail for the given pin.
    pub fn with_missing_pin(self, name: &str) -> Self {
        self.lock().missing.insert(name.to_string());
        self
    }

    /// Make duty-cycle writes on the given pin fail.
    pub fn with_failing_pin(self, name: &str) -> Self {
        self.lock().failing.insert(name.to_string());
        self
    }

    /// Stop injecting write failures on the given pin.
    pub fn heal_pin(&self, name: &str) {
        self.lock().failing.remove(name);
    }

    /// Snapshot of every successful duty write so far.
    pub fn writes(&self) -> Vec<PinWrite> {
        self.lock().writes.clone()
    }

    /// Snapshot of every frequency configuration call so far.
    pub fn frequencies(&self) -> Vec<(String, u32)> {
        self.lock().frequencies.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state
            .lock()
            .expect("infallible: no panic while holding the sim lock")
    }
}

#[async_trait]
impl Board for SimBoard {
    async fn gpio_pin_by_name(&self, name: &str) -> Result<Box<dyn GpioPin>> {
        if self.lock().missing.contains(name) {
            return Err(DeviceError::Init(format!("no such pin '{name}'")));
        }
        Ok(Box::new(SimPin {
            name: name.to_string(),
            state: Arc::clone(&self.state),
        }))
    }
}

struct SimPin {
    name: String,
    state: Arc<Mutex<SimState>>,
}

#[async_trait]
impl GpioPin for SimPin {
    async fn set_pwm_frequency(&self, hz: u32) -> Result<()> {
        self.state
            .lock()
            .expect("infallible: no panic while holding the sim lock")
            .frequencies
            .push((self.name.clone(), hz));
        Ok(())
    }

    async fn set_pwm(&self, duty: f64) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .expect("infallible: no panic while holding the sim lock");
        if state.failing.contains(&self.name) {
            return Err(DeviceError::Write {
                pin: self.name.clone(),
                reason: "injected failure".into(),
            });
        }
        tracing::debug!(pin = %self.name, duty, "pwm write");
        state.writes.push(PinWrite {
            pin: self.name.clone(),
            duty,
        });
        Ok(())
    }
}
