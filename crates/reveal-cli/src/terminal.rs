//! Interactive terminal backed by a line editor.

use std::io;

use console::{style, Term};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use reveal_engine::{Terminal, TerminalError};

/// Terminal for a real TTY: line editing with history, hidden secret
/// input and red diagnostics.
pub struct RustylineTerminal {
    editor: DefaultEditor,
    term: Term,
}

impl RustylineTerminal {
    pub fn new() -> Result<Self, TerminalError> {
        let editor = DefaultEditor::new().map_err(|e| TerminalError::Unavailable(e.to_string()))?;
        Ok(Self {
            editor,
            term: Term::stdout(),
        })
    }

    fn write(&self, text: &str) {
        if let Err(e) = self.term.write_line(text) {
            tracing::warn!("Could not write to terminal: {}", e);
        }
    }
}

impl Terminal for RustylineTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, TerminalError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // Ctrl-C and Ctrl-D both leave the session.
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(TerminalError::Io(e.to_string())),
        }
    }

    fn read_secret(&mut self, prompt: &str) -> Result<Option<String>, TerminalError> {
        if !prompt.is_empty() {
            self.term
                .write_str(prompt)
                .map_err(|e| TerminalError::Io(e.to_string()))?;
        }
        match self.term.read_secure_line() {
            Ok(secret) => Ok(Some(secret)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(TerminalError::Io(e.to_string())),
        }
    }

    fn print(&mut self, text: &str) {
        self.write(text);
    }

    fn print_error(&mut self, text: &str) {
        self.write(&style(text).red().to_string());
    }

    fn clear(&mut self) {
        if let Err(e) = self.term.clear_screen() {
            tracing::debug!("Could not clear screen: {}", e);
        }
    }
}
