//! Command and shortcut tables.
//!
//! Both tables keep insertion order: it is the order commands are listed in
//! help output. Inserting an existing key overwrites its value in place, so
//! layering tables (`extend`) lets later layers win without reshuffling the
//! listing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::instruction::Instruction;

// =============================================================================
// Command Table
// =============================================================================

/// Mapping from command name to instruction template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTable {
    commands: IndexMap<String, Instruction>,
}

impl CommandTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. If the name exists, its instruction is replaced.
    pub fn insert(&mut self, name: impl Into<String>, instruction: Instruction) {
        self.commands.insert(name.into(), instruction);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, instruction: Instruction) -> Self {
        self.insert(name, instruction);
        self
    }

    /// Layer another table on top of this one.
    pub fn extend(&mut self, other: &CommandTable) {
        for (name, instruction) in &other.commands {
            self.commands.insert(name.clone(), instruction.clone());
        }
    }

    /// Look up a command.
    pub fn get(&self, name: &str) -> Option<&Instruction> {
        self.commands.get(name)
    }

    /// Iterate commands in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Instruction)> {
        self.commands.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Command names in listing order.
    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<(String, Instruction)> for CommandTable {
    fn from_iter<I: IntoIterator<Item = (String, Instruction)>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Shortcut Table
// =============================================================================

/// Mapping from a short token (`?`, `.`, `/`, single letters) to a command name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortcutTable {
    shortcuts: IndexMap<String, String>,
}

impl ShortcutTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shortcut. If the token exists, it now maps to `command`.
    pub fn insert(&mut self, token: impl Into<String>, command: impl Into<String>) {
        self.shortcuts.insert(token.into(), command.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, token: impl Into<String>, command: impl Into<String>) -> Self {
        self.insert(token, command);
        self
    }

    /// Layer another table on top of this one.
    pub fn extend(&mut self, other: &ShortcutTable) {
        for (token, command) in &other.shortcuts {
            self.shortcuts.insert(token.clone(), command.clone());
        }
    }

    /// Command name a token stands for.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.shortcuts.get(token).map(String::as_str)
    }

    /// Token listed for a command in help output.
    ///
    /// When several tokens map to one command the last one registered wins.
    pub fn shortcut_for(&self, command: &str) -> Option<&str> {
        self.shortcuts
            .iter()
            .rev()
            .find(|(_, target)| target.as_str() == command)
            .map(|(token, _)| token.as_str())
    }

    /// Iterate shortcuts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.shortcuts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::LocalOperation;

    #[test]
    fn test_command_table_override_keeps_position() {
        let mut table = CommandTable::new()
            .with("help", Instruction::local("Help", LocalOperation::ShowHelp))
            .with("exit", Instruction::local("Exit", LocalOperation::Close));

        let mut layer = CommandTable::new();
        layer.insert("help", Instruction::connector("Connector help", "help"));
        layer.insert("search", Instruction::connector("Search", "search"));
        table.extend(&layer);

        assert_eq!(table.names(), vec!["help", "exit", "search"]);
        assert_eq!(table.get("help").unwrap().description, "Connector help");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_shortcut_table_resolve_and_override() {
        let mut shortcuts = ShortcutTable::new().with("?", "help").with(".", "back");
        assert_eq!(shortcuts.resolve("?"), Some("help"));
        assert_eq!(shortcuts.resolve("x"), None);

        shortcuts.extend(&ShortcutTable::new().with(".", "parent"));
        assert_eq!(shortcuts.resolve("."), Some("parent"));
        assert_eq!(shortcuts.len(), 2);
    }

    #[test]
    fn test_shortcut_for_last_registration_wins() {
        let shortcuts = ShortcutTable::new()
            .with("quit", "exit")
            .with("q", "exit")
            .with("?", "help");

        assert_eq!(shortcuts.shortcut_for("exit"), Some("q"));
        assert_eq!(shortcuts.shortcut_for("help"), Some("?"));
        assert_eq!(shortcuts.shortcut_for("menu"), None);
    }
}
