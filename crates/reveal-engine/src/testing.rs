//! Scripted connector shared by the engine's unit tests.

use std::sync::Arc;

use parking_lot::Mutex;
use reveal_core::{CommandTable, Context, Instruction, Outcome, Question, ShortcutTable};

use crate::connector::{Connector, Menu};
use crate::terminal::Terminal;

pub(crate) const SECRET: &str = "s3cret";

/// Small in-memory backend. Every performed instruction is logged.
#[derive(Default)]
pub(crate) struct ScriptedConnector {
    pub performed: Arc<Mutex<Vec<Instruction>>>,
    pub connected: bool,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector plus a handle on its dispatch log.
    pub fn with_log() -> (Self, Arc<Mutex<Vec<Instruction>>>) {
        let connector = Self::new();
        let log = connector.performed.clone();
        (connector, log)
    }

    pub fn page(id: usize) -> Instruction {
        Instruction::connector(format!("Page {}", id), "show_page")
            .in_context("page")
            .with_subject(id.to_string())
    }
}

impl Connector for ScriptedConnector {
    fn name(&self) -> String {
        "Scripted".to_string()
    }

    fn connect(&mut self, _endpoint: &str, _username: &str, secret: &str) -> bool {
        self.connected = secret == SECRET;
        self.connected
    }

    fn menu(&self, name: &str) -> Option<Menu> {
        (name == "main").then(|| {
            Menu::new()
                .with(
                    "Recent pages",
                    Instruction::connector("List recently viewed pages", "list_pages"),
                )
                .with(
                    "All spaces",
                    Instruction::connector("List all spaces", "list_spaces"),
                )
        })
    }

    fn commands(&self, context: &Context) -> Option<CommandTable> {
        match context.as_str() {
            "global" => Some(CommandTable::new().with(
                "search",
                Instruction::connector("Search pages", "search").parameterized("keywords"),
            )),
            "page" => Some(
                CommandTable::new()
                    .with(
                        "view",
                        Instruction::connector("View page", "show_page").in_context("page"),
                    )
                    .with(
                        "children",
                        Instruction::connector("Show children pages", "children")
                            .in_context("page"),
                    )
                    .with(
                        "comment",
                        Instruction::connector("Add a comment", "comment").in_context("page"),
                    )
                    .with(
                        "restricted",
                        Instruction::connector("Open restricted page", "restricted")
                            .in_context("page"),
                    )
                    .with(
                        "greedy",
                        Instruction::connector("Keeps asking", "greedy").in_context("page"),
                    ),
            ),
            _ => None,
        }
    }

    fn shortcuts(&self) -> ShortcutTable {
        ShortcutTable::new().with("/", "search").with("m", "comment")
    }

    fn perform(&mut self, instruction: &mut Instruction, io: &mut dyn Terminal) -> Outcome {
        self.performed.lock().push(instruction.clone());
        let subject = instruction.subject.clone();

        match instruction.operation.name() {
            "list_pages" => {
                Outcome::global(subject).with_options((1..=6).map(Self::page).collect())
            }
            "list_spaces" => Outcome::global(subject).with_options(vec![Instruction::connector(
                "Engineering",
                "show_space",
            )
            .in_context("space")
            .with_subject("ENG")]),
            "show_page" => {
                io.print(&format!("Page {}", subject.as_deref().unwrap_or("?")));
                Outcome::new(subject, "page")
            }
            "search" => {
                let keywords = instruction.parameter_text().unwrap_or_default().to_string();
                Outcome::global(subject)
                    .with_heading(format!("Results for '{}'", keywords))
                    .with_options(vec![Self::page(1), Self::page(2)])
            }
            "children" => Outcome::new(subject, "page")
                .with_error("This page doesn't have children pages."),
            "restricted" => Outcome::new(subject, "page").with_error("permission denied"),
            "comment" => match instruction.answers() {
                Some(answers) => {
                    let text = answers
                        .first()
                        .and_then(|q| q.answer_text())
                        .unwrap_or_default();
                    io.print(&format!("Comment added: {}", text));
                    Outcome::new(subject, "page")
                }
                None => Outcome::new(subject, "page")
                    .asking(vec![Question::new("Comment:").mandatory()]),
            },
            "greedy" => Outcome::new(subject, "page").asking(vec![Question::new("Again?")]),
            other => Outcome::new(subject, "global").with_error(format!("Unknown operation {}", other)),
        }
    }
}
