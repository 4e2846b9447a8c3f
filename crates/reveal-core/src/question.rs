//! Questions asked during multi-step interactions.

use serde::{Deserialize, Serialize};

use crate::selection::SelectionMode;

/// A prompt the engine puts to the user on behalf of a connector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text.
    pub summary: String,

    /// Choices, listed 1-based. Empty for free-text questions.
    #[serde(default)]
    pub options: Vec<String>,

    /// Whether one or several options may be chosen.
    #[serde(default)]
    pub selection: SelectionMode,

    /// Whether an empty answer is rejected.
    #[serde(default)]
    pub mandatory: bool,

    /// Raw answer as typed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// 1-based positions picked from `options`.
    #[serde(default)]
    pub selected: Vec<usize>,
}

impl Question {
    /// Create a free-text question.
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Reject empty answers.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Offer a list of choices.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Allow several choices.
    pub fn multi(mut self) -> Self {
        self.selection = SelectionMode::Multi;
        self
    }

    pub fn is_multi(&self) -> bool {
        self.selection == SelectionMode::Multi
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Parse an answer against the option list.
    ///
    /// Single selection takes one number; multi selection takes
    /// comma-separated numbers (spaces ignored). Every number must be in
    /// `1..=options.len()`. Duplicates collapse to their first occurrence.
    pub fn parse_selection(&self, answer: &str) -> Option<Vec<usize>> {
        let in_range = |n: usize| n >= 1 && n <= self.options.len();

        if !self.is_multi() {
            let n = answer.trim().parse::<usize>().ok()?;
            return in_range(n).then(|| vec![n]);
        }

        let compact: String = answer.chars().filter(|c| !c.is_whitespace()).collect();
        let mut selected = Vec::new();
        for part in compact.split(',') {
            let n = part.parse::<usize>().ok()?;
            if !in_range(n) {
                return None;
            }
            if !selected.contains(&n) {
                selected.push(n);
            }
        }
        (!selected.is_empty()).then_some(selected)
    }

    /// The text of the first chosen option, or the raw answer for
    /// free-text questions.
    pub fn answer_text(&self) -> Option<&str> {
        match self.selected.first() {
            Some(n) => n
                .checked_sub(1)
                .and_then(|i| self.options.get(i))
                .map(String::as_str),
            None => self.answer.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_selection() {
        let q = Question::new("Pick one").with_options(["a", "b", "c"]);
        assert_eq!(q.parse_selection("2"), Some(vec![2]));
        assert_eq!(q.parse_selection(" 3 "), Some(vec![3]));
        assert_eq!(q.parse_selection("0"), None);
        assert_eq!(q.parse_selection("4"), None);
        assert_eq!(q.parse_selection("1,2"), None);
        assert_eq!(q.parse_selection("x"), None);
    }

    #[test]
    fn test_multi_selection() {
        let q = Question::new("Pick some").with_options(["a", "b", "c"]).multi();
        assert_eq!(q.parse_selection("1, 3"), Some(vec![1, 3]));
        assert_eq!(q.parse_selection("2,2,1"), Some(vec![2, 1]));
        assert_eq!(q.parse_selection("1,4"), None);
        assert_eq!(q.parse_selection("1,,2"), None);
        assert_eq!(q.parse_selection(""), None);
    }

    #[test]
    fn test_answer_text() {
        let mut choice = Question::new("Pick").with_options(["red", "blue"]);
        choice.answer = Some("2".to_string());
        choice.selected = vec![2];
        assert_eq!(choice.answer_text(), Some("blue"));

        let mut free = Question::new("Comment:").mandatory();
        free.answer = Some("Looks good".to_string());
        assert_eq!(free.answer_text(), Some("Looks good"));
    }
}
