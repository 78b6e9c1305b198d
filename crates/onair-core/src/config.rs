/// Immutable service configuration, constructed once at startup and passed
/// into the dispatcher and device constructors. No ambient lookup happens
/// inside request handling.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret used for the endpoint validation challenge.
    pub secret_token: String,
    /// The one participant whose join/leave events drive the indicator.
    pub username: String,
}

impl Config {
    pub fn new(secret_token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            secret_token: secret_token.into(),
            username: username.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stores_fields() {
        let config = Config::new("s3cret", "Pat");
        assert_eq!(config.secret_token, "s3cret");
        assert_eq!(config.username, "Pat");
    }
}
