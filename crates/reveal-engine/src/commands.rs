//! Engine-level command and shortcut tables.
//!
//! Secondary commands only make sense with a connector attached; primary
//! commands are always available.

use reveal_core::{CommandTable, Instruction, LocalOperation, ShortcutTable};

pub const HELP: &str = "help";
pub const MENU: &str = "menu";
pub const BACK: &str = "back";
pub const CONNECT: &str = "connect";
pub const EXIT: &str = "exit";

/// Name of the menu every connector provides.
pub const MAIN_MENU: &str = "main";

/// Commands available while connected.
pub fn secondary_commands() -> CommandTable {
    CommandTable::new()
        .with(
            HELP,
            Instruction::local("Open help for current context", LocalOperation::ShowHelp),
        )
        .with(
            MENU,
            Instruction::local("Go to main menu", LocalOperation::ShowMenu).with_parameter(MAIN_MENU),
        )
        .with(
            BACK,
            Instruction::local("Go to previous", LocalOperation::GoBack).without_history(),
        )
}

/// Commands available at all times.
pub fn primary_commands() -> CommandTable {
    CommandTable::new()
        .with(
            CONNECT,
            Instruction::local(
                "Initiate a new connection. Close current if connected.",
                LocalOperation::Connect,
            ),
        )
        .with(EXIT, Instruction::local("Exits the program", LocalOperation::Close))
}

/// Engine shortcuts. Connector shortcuts are layered on top.
pub fn default_shortcuts() -> ShortcutTable {
    ShortcutTable::new()
        .with("?", HELP)
        .with(".", BACK)
        .with("quit", EXIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_is_not_recorded() {
        let table = secondary_commands();
        assert!(!table.get(BACK).unwrap().requires_history());
        assert!(table.get(HELP).unwrap().requires_history());
        assert_eq!(table.get(MENU).unwrap().parameter_text(), Some("main"));
    }

    #[test]
    fn test_primary_commands() {
        let table = primary_commands();
        assert_eq!(table.names(), vec![CONNECT, EXIT]);
        assert_eq!(
            table.get(EXIT).unwrap().local_operation(),
            Some(LocalOperation::Close)
        );
    }

    #[test]
    fn test_default_shortcuts() {
        let shortcuts = default_shortcuts();
        assert_eq!(shortcuts.resolve("?"), Some(HELP));
        assert_eq!(shortcuts.resolve("."), Some(BACK));
        assert_eq!(shortcuts.resolve("quit"), Some(EXIT));
    }
}
