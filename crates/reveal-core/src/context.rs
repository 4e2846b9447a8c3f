//! Navigation contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named navigation mode that selects the active command table.
///
/// The engine only knows `global`; connectors define their own
/// contexts (`space`, `page`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(String);

impl Context {
    /// Name of the context every connector must define.
    pub const GLOBAL: &'static str = "global";

    /// Create a context from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The `global` context.
    pub fn global() -> Self {
        Self(Self::GLOBAL.to_string())
    }

    /// Check if this is the `global` context.
    pub fn is_global(&self) -> bool {
        self.0 == Self::GLOBAL
    }

    /// Get the context name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Context name with its first letter upper-cased, for screen titles.
    pub fn heading(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::global()
    }
}

impl From<&str> for Context {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Context {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Context {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
