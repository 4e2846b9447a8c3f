//! Navigation engine for the Reveal client.
//!
//! This crate provides the interactive core:
//! - `Navigator` - resolves input into instructions, dispatches them and
//!   keeps the navigation position and history
//! - `Connector` - the contract a backend implements
//! - `ConnectorRegistry` - connector discovery for session bootstrap
//! - `HistoryStack` - back navigation
//! - `Terminal` - the line-oriented I/O seam
//! - `CredentialStore` - the contract for stored sites and secrets
//!
//! ## Turn Flow
//!
//! ```text
//! read line ──► CommandLine::parse ──► resolve
//!                                        │
//!                          ┌─────────────┴─────────────┐
//!                          ▼                           ▼
//!                   local operation             connector.perform
//!                 (help/menu/back/...)                 │
//!                          │                  questions? ──► question flow
//!                          │                           │      └► perform again
//!                          └─────────────┬─────────────┘
//!                                        ▼
//!                        error? ──► print + go_back
//!                                        │
//!                                        ▼
//!                          render heading + numbered options
//! ```

pub mod bootstrap;
pub mod commands;
pub mod connector;
pub mod credentials;
pub mod error;
pub mod history;
pub mod input;
pub mod navigator;
pub mod registry;
pub mod render;
pub mod terminal;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use connector::{Connector, Menu};
pub use credentials::{strip_site, CredentialError, CredentialStore};
pub use error::{EngineError, EngineResult, TerminalError};
pub use history::HistoryStack;
pub use input::CommandLine;
pub use navigator::{Flow, Navigator, Session, Turn};
pub use registry::{ConnectorFactory, ConnectorRegistry, RegistryError};
pub use terminal::{BufferedTerminal, Terminal};

// Re-export reveal_core types for convenience
pub use reveal_core::{
    CommandTable, Context, Instruction, LocalOperation, Operation, Outcome, Parameter, Question,
    SelectionMode, ShortcutTable,
};
