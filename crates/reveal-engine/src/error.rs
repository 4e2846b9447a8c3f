//! Error types for the navigation engine.
//!
//! Backend failures never show up here: connectors turn them into an
//! `Outcome` with `error` set. These errors are about the session itself
//! (the terminal went away, nothing to connect to).

use thiserror::Error;

/// Terminal I/O errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Reading or writing the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Io(String),

    /// The line editor could not be set up.
    #[error("Terminal unavailable: {0}")]
    Unavailable(String),
}

/// Error type for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Terminal failure.
    #[error(transparent)]
    Terminal(#[from] TerminalError),

    /// Input ended while the engine was waiting for an answer.
    #[error("Input closed")]
    InputClosed,

    /// No connector implementations are registered.
    #[error("No connectors are registered")]
    NoConnectors,

    /// A question flow was started while another one was running.
    #[error("A question flow is already in progress")]
    QuestionFlowBusy,
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::NoConnectors;
        assert_eq!(err.to_string(), "No connectors are registered");

        let err: EngineError = TerminalError::Io("broken pipe".to_string()).into();
        assert_eq!(err.to_string(), "Terminal I/O failed: broken pipe");
    }
}
