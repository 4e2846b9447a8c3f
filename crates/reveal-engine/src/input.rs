//! Parsing of one line of user input.

/// A line split into the command token and its trailing parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// First token: a command name, shortcut or option number.
    pub command: String,

    /// Everything after the first token, if anything but whitespace.
    pub parameter: Option<String>,
}

impl CommandLine {
    /// Split a raw input line.
    ///
    /// `/foo bar` is read as the shortcut `/` with parameter `foo bar`.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix('/') {
            if !rest.is_empty() {
                return Self {
                    command: "/".to_string(),
                    parameter: Some(rest.trim().to_string()).filter(|p| !p.is_empty()),
                };
            }
        }

        match line.split_once(char::is_whitespace) {
            Some((command, rest)) => {
                let rest = rest.trim();
                Self {
                    command: command.to_string(),
                    parameter: (!rest.is_empty()).then(|| rest.to_string()),
                }
            }
            None => Self {
                command: line.to_string(),
                parameter: None,
            },
        }
    }

    /// Check if the line was blank.
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}
