//! Turning a command token into an instruction.

use reveal_core::{
    CommandTable, Context, HelpIndex, Instruction, LocalOperation, Outcome, ShortcutTable,
};

use super::Navigator;
use crate::commands::{default_shortcuts, primary_commands, secondary_commands, HELP};
use crate::terminal::Terminal;

impl<T: Terminal> Navigator<T> {
    /// Resolve a command token against the outcome on screen.
    ///
    /// A number selects from the outcome's options. Anything else is looked
    /// up in the composed command table after one shortcut substitution.
    /// `None` means nothing matched.
    pub fn resolve(&self, command: &str, current: Option<&Outcome>) -> Option<Instruction> {
        let is_number = !command.is_empty() && command.chars().all(|c| c.is_ascii_digit());
        if is_number {
            if let Some(outcome) = current.filter(|o| !o.options.is_empty()) {
                let number = command.parse::<usize>().ok()?;
                return outcome.option(number).cloned();
            }
        }

        let commands = self.available_commands();
        let shortcuts = self.available_shortcuts();
        let name = shortcuts.resolve(command).unwrap_or(command);

        let mut instruction = commands.get(name)?.clone();
        instruction.subject = current.and_then(|o| o.subject.clone());
        if instruction.local_operation() == Some(LocalOperation::ShowHelp) {
            instruction.help = Some(HelpIndex {
                commands: commands.clone(),
                shortcuts: shortcuts.clone(),
            });
        }

        Some(inherit_position(instruction, current))
    }

    /// Commands in effect for the session's context.
    ///
    /// Layers, later ones overriding: connector context table, connector
    /// global table, engine secondary commands (connected only), engine
    /// primary commands.
    pub fn available_commands(&self) -> CommandTable {
        let mut table = CommandTable::new();
        if let Some(connector) = &self.session.connector {
            if let Some(context_table) = connector.commands(&self.session.context) {
                table.extend(&context_table);
            }
            if !self.session.context.is_global() {
                if let Some(global) = connector.commands(&Context::global()) {
                    table.extend(&global);
                }
            }
            table.extend(&secondary_commands());
        }
        table.extend(&primary_commands());
        table
    }

    /// Engine shortcuts with the connector's layered on top.
    pub fn available_shortcuts(&self) -> ShortcutTable {
        let mut shortcuts = default_shortcuts();
        if let Some(connector) = &self.session.connector {
            shortcuts.extend(&connector.shortcuts());
        }
        shortcuts
    }

    /// Help instruction at the session's current position, used after an
    /// invalid command.
    pub(super) fn help_fallback(&self) -> Option<Instruction> {
        let mut help = self.resolve(HELP, None)?;
        help.context = self.session.context.clone();
        help.subject = self.session.subject.clone();
        Some(help)
    }
}

/// Global commands keep operating on the entity in focus.
///
/// A command whose target context is `global`, resolved while the screen
/// has a subject, takes over the screen's context and subject. Applies to
/// local and connector commands alike; option selections are never
/// rewritten.
pub(crate) fn inherit_position(mut instruction: Instruction, current: Option<&Outcome>) -> Instruction {
    if let Some(outcome) = current {
        if instruction.context.is_global() && outcome.subject.is_some() {
            instruction.context = outcome.context.clone();
            instruction.subject = outcome.subject.clone();
        }
    }
    instruction
}
