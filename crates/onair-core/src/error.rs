use thiserror::Error;

#[derive(Debug, Error)]
pub enum OnAirError {
    #[error("malformed webhook request: {0}")]
    MalformedRequest(String),

    #[error("colour channel out of range: {0}")]
    ChannelOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, OnAirError>;
