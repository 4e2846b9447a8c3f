//! Instructions: the selectable commands and menu entries of a session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::context::Context;
use crate::question::Question;
use crate::table::{CommandTable, ShortcutTable};

// =============================================================================
// Operations
// =============================================================================

/// Operations the navigation engine performs itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalOperation {
    ShowHelp,
    ShowMenu,
    GoBack,
    Connect,
    Close,
}

impl LocalOperation {
    /// Stable identifier used in help output and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocalOperation::ShowHelp => "show_help",
            LocalOperation::ShowMenu => "show_menu",
            LocalOperation::GoBack => "go_back",
            LocalOperation::Connect => "connect",
            LocalOperation::Close => "close",
        }
    }
}

/// What an instruction invokes when executed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Operation {
    /// Handled by the engine.
    Local(LocalOperation),

    /// Handled by the active connector. The identifier is the connector's own.
    Connector(String),
}

impl Operation {
    /// Stable identifier of the operation.
    pub fn name(&self) -> &str {
        match self {
            Operation::Local(op) => op.as_str(),
            Operation::Connector(name) => name,
        }
    }

    /// Check if the engine handles this operation itself.
    pub fn is_local(&self) -> bool {
        matches!(self, Operation::Local(_))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Parameter
// =============================================================================

/// Argument carried by an instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    /// Free text typed after the command, or synthesized by a connector.
    Text(String),

    /// Answered questions from a multi-step interaction.
    Answers(Vec<Question>),
}

impl From<&str> for Parameter {
    fn from(s: &str) -> Self {
        Parameter::Text(s.to_string())
    }
}

impl From<String> for Parameter {
    fn from(s: String) -> Self {
        Parameter::Text(s)
    }
}

// =============================================================================
// Help Index
// =============================================================================

/// Command and shortcut tables attached to a help instruction so the
/// help screen can enumerate what is available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HelpIndex {
    pub commands: CommandTable,
    pub shortcuts: ShortcutTable,
}

// =============================================================================
// Instruction
// =============================================================================

/// A selectable command or menu entry.
///
/// Instructions are templates: the engine clones one out of a command table
/// or option list, fills in `subject` and `parameter`, and dispatches it.
/// History keeps its own clones, so mutating a live instruction never
/// reaches back into history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Human-readable description.
    pub description: String,

    /// Operation to invoke.
    pub operation: Operation,

    /// Context whose command table becomes active after execution.
    #[serde(default)]
    pub context: Context,

    /// Whether executing this instruction is recorded in history.
    #[serde(default = "default_history")]
    pub history: bool,

    /// Entity this instruction operates on (e.g. a page id).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Argument for the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Parameter>,

    /// Hint of the free text the instruction expects, for help output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameterized: Option<String>,

    /// Heading override for the list this instruction produces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Text shown when the instruction is an entry of a numbered list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Tables attached by the resolver for help instructions.
    #[serde(skip)]
    pub help: Option<HelpIndex>,
}

fn default_history() -> bool {
    true
}

impl Instruction {
    /// Create an instruction with required fields.
    pub fn new(description: impl Into<String>, operation: Operation) -> Self {
        Self {
            description: description.into(),
            operation,
            context: Context::global(),
            history: true,
            subject: None,
            parameter: None,
            parameterized: None,
            title: None,
            label: None,
            help: None,
        }
    }

    /// Create an instruction handled by the engine.
    pub fn local(description: impl Into<String>, operation: LocalOperation) -> Self {
        Self::new(description, Operation::Local(operation))
    }

    /// Create an instruction handled by the active connector.
    pub fn connector(description: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::new(description, Operation::Connector(operation.into()))
    }

    /// Set the context that becomes active after execution.
    pub fn in_context(mut self, context: impl Into<Context>) -> Self {
        self.context = context.into();
        self
    }

    /// Set the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set a text parameter.
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(Parameter::Text(parameter.into()));
        self
    }

    /// Set the help hint for the free text this instruction expects.
    pub fn parameterized(mut self, hint: impl Into<String>) -> Self {
        self.parameterized = Some(hint.into());
        self
    }

    /// Set the heading override for the produced list.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the list label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Exclude this instruction from history.
    pub fn without_history(mut self) -> Self {
        self.history = false;
        self
    }

    /// Check if the engine handles this instruction itself.
    pub fn is_local(&self) -> bool {
        self.operation.is_local()
    }

    /// Check if executing this instruction is recorded in history.
    pub fn requires_history(&self) -> bool {
        self.history
    }

    /// Get the local operation, if this is an engine instruction.
    pub fn local_operation(&self) -> Option<LocalOperation> {
        match self.operation {
            Operation::Local(op) => Some(op),
            Operation::Connector(_) => None,
        }
    }

    /// Text shown for this instruction in a numbered list.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.description)
    }

    /// Text parameter, if one is set.
    pub fn parameter_text(&self) -> Option<&str> {
        match &self.parameter {
            Some(Parameter::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Answered questions, if the parameter holds them.
    pub fn answers(&self) -> Option<&[Question]> {
        match &self.parameter {
            Some(Parameter::Answers(answers)) => Some(answers),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let instruction = Instruction::connector("Show page", "show_page");
        assert!(instruction.context.is_global());
        assert!(instruction.requires_history());
        assert!(!instruction.is_local());
        assert_eq!(instruction.operation.name(), "show_page");
        assert_eq!(instruction.display_label(), "Show page");
    }

    #[test]
    fn test_local_operation_names() {
        let help = Instruction::local("Open help", LocalOperation::ShowHelp);
        assert!(help.is_local());
        assert_eq!(help.local_operation(), Some(LocalOperation::ShowHelp));
        assert_eq!(help.operation.to_string(), "show_help");
        assert_eq!(LocalOperation::GoBack.as_str(), "go_back");
    }

    #[test]
    fn test_label_overrides_description() {
        let entry = Instruction::connector("List your favourited pages", "list_favourite_pages")
            .with_label("Favourite pages");
        assert_eq!(entry.display_label(), "Favourite pages");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Instruction::connector("Show page", "show_page").with_subject("42");
        let mut live = original.clone();
        live.subject = Some("7".to_string());
        live.parameter = Some(Parameter::from("changed"));

        assert_eq!(original.subject.as_deref(), Some("42"));
        assert!(original.parameter.is_none());
    }

    #[test]
    fn test_parameter_accessors() {
        let text = Instruction::connector("Search", "search").with_parameter("rust");
        assert_eq!(text.parameter_text(), Some("rust"));
        assert!(text.answers().is_none());

        let mut answered = Instruction::connector("Comment", "add_comment");
        answered.parameter = Some(Parameter::Answers(vec![Question::new("Comment:")]));
        assert!(answered.parameter_text().is_none());
        assert_eq!(answered.answers().map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_serde_round_trip_keeps_operation_kind() {
        let instruction = Instruction::local("Go to main menu", LocalOperation::ShowMenu)
            .with_parameter("main");
        let json = serde_json::to_string(&instruction).unwrap();
        assert!(json.contains("\"show_menu\""));

        let parsed: Instruction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, instruction);
    }
}
