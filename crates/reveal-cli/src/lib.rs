//! Reveal terminal client.
//!
//! The pieces the `reveal` binary wires into the navigation engine:
//! - `terminal` - line editing on a real TTY
//! - `credentials` - stored sites and secrets on disk
//! - `editor` - round-trips text through an external editor
//! - `connectors` - the bundled connector implementations

pub mod connectors;
pub mod credentials;
pub mod editor;
pub mod terminal;
