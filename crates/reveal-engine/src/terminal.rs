//! Line-oriented terminal I/O.
//!
//! The engine, the question flow, bootstrap and connectors all talk to the
//! user through `Terminal`. The binary backs it with a line editor; tests use
//! `BufferedTerminal`.

use std::collections::VecDeque;

use crate::error::TerminalError;

/// Line-oriented terminal used by the engine and connectors.
pub trait Terminal {
    /// Read one line of input. `Ok(None)` means input has ended.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, TerminalError>;

    /// Read one line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> Result<Option<String>, TerminalError> {
        self.read_line(prompt)
    }

    /// Print text followed by a newline.
    fn print(&mut self, text: &str);

    /// Print a diagnostic.
    fn print_error(&mut self, text: &str) {
        self.print(text);
    }

    /// Clear the screen.
    fn clear(&mut self) {}
}

// =============================================================================
// Buffered Terminal
// =============================================================================

/// Terminal with scripted input and captured output.
///
/// Printed text is split into lines. Reading past the end of the script
/// reports end of input.
#[derive(Debug, Default)]
pub struct BufferedTerminal {
    input: VecDeque<String>,
    output: Vec<String>,
    clears: usize,
}

impl BufferedTerminal {
    /// Create a terminal that will answer reads with `lines`, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            clears: 0,
        }
    }

    /// Lines printed so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Everything printed so far, newline separated.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Take the printed lines, leaving the buffer empty.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Check if any printed line equals `line`.
    pub fn printed(&self, line: &str) -> bool {
        self.output.iter().any(|l| l == line)
    }

    /// Number of unread input lines.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// How many times the screen was cleared.
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Terminal for BufferedTerminal {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, TerminalError> {
        Ok(self.input.pop_front())
    }

    fn print(&mut self, text: &str) {
        self.output.extend(text.lines().map(str::to_string));
        if text.is_empty() {
            self.output.push(String::new());
        }
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}
