use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    /// A named pin could not be resolved at setup. Fatal: the process must
    /// not begin serving traffic.
    #[error("device init failed: {0}")]
    Init(String),

    #[error("pin write failed on '{pin}': {reason}")]
    Write { pin: String, reason: String },

    #[error("pin write timed out on '{pin}'")]
    Timeout { pin: String },
}

pub type Result<T> = std::result::Result<T, DeviceError>;
