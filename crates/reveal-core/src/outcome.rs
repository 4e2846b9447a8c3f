//! Outcome of an executed instruction.

use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::instruction::Instruction;
use crate::question::Question;

/// Result of executing an instruction.
///
/// `options` is the next selectable menu. Its order defines the 1-based
/// numbers shown to the user and is never changed by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Entity in focus after execution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Context in effect after execution.
    #[serde(default)]
    pub context: Context,

    /// Next selectable menu.
    #[serde(default)]
    pub options: Vec<Instruction>,

    /// Line printed above the option list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    /// Failure message. The engine prints it and navigates back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Questions the user must answer before the operation can finish.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,

    /// Answers already collected for `questions`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<Question>>,
}

impl Outcome {
    /// Create an outcome at the given position.
    pub fn new(subject: Option<String>, context: impl Into<Context>) -> Self {
        Self {
            subject,
            context: context.into(),
            ..Self::default()
        }
    }

    /// Create an outcome in the `global` context.
    pub fn global(subject: Option<String>) -> Self {
        Self::new(subject, Context::global())
    }

    /// Set the next menu.
    pub fn with_options(mut self, options: Vec<Instruction>) -> Self {
        self.options = options;
        self
    }

    /// Set the heading printed above the options.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Mark the outcome as failed.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Ask the user questions before finishing.
    pub fn asking(mut self, questions: Vec<Question>) -> Self {
        self.questions = Some(questions);
        self
    }

    /// Check if the engine must run the question flow.
    pub fn needs_answers(&self) -> bool {
        matches!(&self.questions, Some(questions) if !questions.is_empty())
            && self.answers.is_none()
    }

    /// Option by its 1-based number.
    pub fn option(&self, number: usize) -> Option<&Instruction> {
        number.checked_sub(1).and_then(|index| self.options.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(count: usize) -> Vec<Instruction> {
        (1..=count)
            .map(|i| {
                Instruction::connector(format!("Page {}", i), "show_page")
                    .in_context("page")
                    .with_subject(i.to_string())
            })
            .collect()
    }

    #[test]
    fn test_option_numbering_is_one_based() {
        let outcome = Outcome::global(None).with_options(pages(6));

        assert!(outcome.option(0).is_none());
        assert_eq!(outcome.option(1).unwrap().description, "Page 1");
        assert_eq!(outcome.option(5).unwrap().subject.as_deref(), Some("5"));
        assert_eq!(outcome.option(6).unwrap().description, "Page 6");
        assert!(outcome.option(7).is_none());
    }

    #[test]
    fn test_needs_answers() {
        let plain = Outcome::new(Some("1".to_string()), "page");
        assert!(!plain.needs_answers());

        let asking = plain.clone().asking(vec![Question::new("Comment:")]);
        assert!(asking.needs_answers());

        let mut answered = asking.clone();
        answered.answers = Some(Vec::new());
        assert!(!answered.needs_answers());

        let empty = plain.asking(Vec::new());
        assert!(!empty.needs_answers());
    }

    #[test]
    fn test_error_builder() {
        let outcome = Outcome::new(Some("1".to_string()), "page").with_error("permission denied");
        assert_eq!(outcome.error.as_deref(), Some("permission denied"));
        assert_eq!(outcome.context.as_str(), "page");
    }
}
