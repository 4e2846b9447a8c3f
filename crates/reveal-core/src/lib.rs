//! Core types for the Reveal navigation client.
//!
//! This crate contains shared data structures that are used across all Reveal crates:
//! - Instructions (action descriptors) and their operations
//! - Outcomes returned by executed instructions
//! - Questions for multi-step interactions
//! - Command and shortcut tables
//! - Configuration types
//! - Error types

mod config;
mod context;
mod error;
mod instruction;
mod outcome;
mod question;
mod selection;
mod table;

pub use config::{
    config_dir, config_path, AppConfig, CredentialsConfig, DisplayConfig,
    EditorConfig, LoggingConfig,
};
pub use context::Context;
pub use error::ConfigError;
pub use instruction::{HelpIndex, Instruction, LocalOperation, Operation, Parameter};
pub use outcome::Outcome;
pub use question::Question;
pub use selection::SelectionMode;
pub use table::{CommandTable, ShortcutTable};
