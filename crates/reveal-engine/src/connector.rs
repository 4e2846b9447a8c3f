//! The connector contract.
//!
//! A connector is a backend the engine navigates: it authenticates, publishes
//! menus and per-context command tables, and performs the operations its
//! instructions name.

use reveal_core::{CommandTable, Context, Instruction, Outcome, ShortcutTable};

use crate::terminal::Terminal;

/// A named menu: entry label to instruction, in display order.
pub type Menu = CommandTable;

/// Capability interface every backend implements.
///
/// All calls are synchronous and may block on I/O. Operations never fail
/// outward: internal faults become an `Outcome` with `error` set, or a
/// printed diagnostic plus a safe fallback outcome.
pub trait Connector {
    /// Display name, e.g. `Catalog (/srv/wiki.json)`.
    fn name(&self) -> String;

    /// Establish backend session state.
    ///
    /// Returns `false` on any failure (auth, network, malformed endpoint).
    fn connect(&mut self, endpoint: &str, username: &str, secret: &str) -> bool;

    /// Menu by name. Every connector provides `main`.
    fn menu(&self, name: &str) -> Option<Menu>;

    /// Command table for a context. Every connector provides `global`.
    fn commands(&self, context: &Context) -> Option<CommandTable>;

    /// Connector shortcuts. They extend and override the engine's own.
    fn shortcuts(&self) -> ShortcutTable;

    /// Perform the connector operation named by `instruction.operation`.
    ///
    /// The instruction is the live copy for this dispatch; the connector may
    /// rewrite its subject or parameter while working.
    fn perform(&mut self, instruction: &mut Instruction, io: &mut dyn Terminal) -> Outcome;
}
