//! Multi-step question flow.

use reveal_core::Question;

use super::Navigator;
use crate::error::{EngineError, EngineResult};
use crate::render::numbered;
use crate::terminal::Terminal;

impl<T: Terminal> Navigator<T> {
    /// Put each question to the user, in order, and return them answered.
    ///
    /// Only one flow may run at a time.
    pub(super) fn ask(&mut self, questions: Vec<Question>) -> EngineResult<Vec<Question>> {
        if self.asking {
            return Err(EngineError::QuestionFlowBusy);
        }

        self.asking = true;
        let max_width = self.display.max_width;
        let answered = questions
            .into_iter()
            .map(|question| ask_question(&mut self.io, question, max_width))
            .collect();
        self.asking = false;
        answered
    }
}

/// Prompt until the answer satisfies the question.
pub(crate) fn ask_question(
    io: &mut dyn Terminal,
    mut question: Question,
    max_width: usize,
) -> EngineResult<Question> {
    let mut error: Option<String> = None;
    loop {
        if let Some(error) = error.take() {
            io.print_error(&format!("ERROR: {}", error));
        }
        io.print(&question.summary);
        if question.has_options() {
            io.print(&numbered(&question.options, max_width).join("\n"));
        }

        let answer = io.read_line("")?.ok_or(EngineError::InputClosed)?;
        let answer = answer.trim();

        if answer.is_empty() {
            if question.mandatory {
                error = Some(format!("A value is required for \"{}\"", question.summary));
                continue;
            }
            question.answer = Some(String::new());
            return Ok(question);
        }

        if question.has_options() {
            match question.parse_selection(answer) {
                Some(selected) => question.selected = selected,
                None => {
                    error = Some(format!(
                        "A valid option is required for \"{}\"",
                        question.summary
                    ));
                    continue;
                }
            }
        }

        question.answer = Some(answer.to_string());
        return Ok(question);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::BufferedTerminal;

    #[test]
    fn test_mandatory_reprompts_until_answered() {
        let mut io = BufferedTerminal::new(["", "  ", "", "Looks good"]);
        let question = Question::new("Comment:").mandatory();

        let answered = ask_question(&mut io, question, 80).unwrap();

        assert_eq!(answered.answer.as_deref(), Some("Looks good"));
        let errors = io
            .output()
            .iter()
            .filter(|l| *l == "ERROR: A value is required for \"Comment:\"")
            .count();
        assert_eq!(errors, 3);
    }

    #[test]
    fn test_mandatory_never_returns_empty() {
        let mut io = BufferedTerminal::new(["", ""]);
        let question = Question::new("Title:").mandatory();

        let result = ask_question(&mut io, question, 80);
        assert!(matches!(result, Err(EngineError::InputClosed)));
    }

    #[test]
    fn test_optional_accepts_empty() {
        let mut io = BufferedTerminal::new([""]);
        let answered = ask_question(&mut io, Question::new("Labels:"), 80).unwrap();
        assert_eq!(answered.answer.as_deref(), Some(""));
        assert!(answered.selected.is_empty());
    }

    #[test]
    fn test_single_selection_validation() {
        let mut io = BufferedTerminal::new(["4", "2"]);
        let question = Question::new("Space:").with_options(["ENG", "OPS", "HR"]);

        let answered = ask_question(&mut io, question, 80).unwrap();

        assert_eq!(answered.selected, vec![2]);
        assert_eq!(answered.answer_text(), Some("OPS"));
        assert!(io.printed("ERROR: A valid option is required for \"Space:\""));
        assert!(io.printed("3. HR"));
    }

    #[test]
    fn test_multi_selection() {
        let mut io = BufferedTerminal::new(["1, 3"]);
        let question = Question::new("Labels:")
            .with_options(["draft", "review", "final"])
            .multi();

        let answered = ask_question(&mut io, question, 80).unwrap();
        assert_eq!(answered.selected, vec![1, 3]);
        assert_eq!(answered.answer.as_deref(), Some("1, 3"));
    }
}
