//! External text editor.

use std::fs;
use std::io::Write;
use std::process::Command;

use reveal_core::EditorConfig;
use thiserror::Error;

const DEFAULT_EDITOR: &str = "vim";
const WINDOWS_EDITOR: &str = "notepad";

/// Errors raised while editing text externally.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No editor command configured")]
    NoCommand,

    #[error("Could not start editor '{command}': {message}")]
    Spawn { command: String, message: String },

    #[error("Editor '{command}' exited with status {status}")]
    Failed { command: String, status: String },

    #[error("Editor file error: {0}")]
    Io(String),
}

/// Hands text to the user for editing and returns the result.
#[cfg_attr(test, mockall::automock)]
pub trait Editor {
    /// Blocks until the user is done.
    fn edit(&self, initial: &str) -> Result<String, EditorError>;
}

/// Runs an editor program on a temporary file.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// Editor running `command`. Extra words are passed as leading arguments.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Pick the editor from configuration, then `VISUAL`, then `EDITOR`,
    /// then the platform default.
    pub fn from_config(config: &EditorConfig) -> Self {
        let command = config
            .command
            .clone()
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(default_editor);
        let editor = Self::new(command);
        tracing::debug!("Using editor: {}", editor.command());
        editor
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

fn default_editor() -> String {
    if cfg!(windows) {
        WINDOWS_EDITOR.to_string()
    } else {
        DEFAULT_EDITOR.to_string()
    }
}

impl Editor for ExternalEditor {
    fn edit(&self, initial: &str) -> Result<String, EditorError> {
        let mut words = self.command.split_whitespace();
        let program = words.next().ok_or(EditorError::NoCommand)?;

        let mut file = tempfile::Builder::new()
            .prefix("reveal-")
            .suffix(".txt")
            .tempfile()
            .map_err(|e| EditorError::Io(e.to_string()))?;
        file.write_all(initial.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| EditorError::Io(e.to_string()))?;

        let status = Command::new(program)
            .args(words)
            .arg(file.path())
            .status()
            .map_err(|e| EditorError::Spawn {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(EditorError::Failed {
                command: self.command.clone(),
                status: status.to_string(),
            });
        }

        fs::read_to_string(file.path()).map_err(|e| EditorError::Io(e.to_string()))
    }
}
