use std::sync::Arc;

use onair_core::Config;
use onair_device::ActuationHandle;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub actuation: ActuationHandle,
}

impl AppState {
    pub fn new(config: Config, actuation: ActuationHandle) -> Self {
        Self {
            config: Arc::new(config),
            actuation,
        }
    }
}
