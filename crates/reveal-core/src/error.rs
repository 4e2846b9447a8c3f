//! Error types for the Reveal core crate.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value was parsed but is out of range.
    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::Invalid {
            key: "display.max_width".to_string(),
            message: "must be at least 20".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'display.max_width': must be at least 20"
        );
    }
}
