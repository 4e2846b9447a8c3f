//! Selection mode types.

use serde::{Deserialize, Serialize};

/// How many options a question accepts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Exactly one option.
    #[default]
    Single,
    /// One or more options, comma separated.
    Multi,
}
