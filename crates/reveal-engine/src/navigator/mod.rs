//! Navigator
//!
//! The Navigator runs the read-eval loop of a session:
//! - Command and option resolution
//! - Dispatch to local operations or the active connector
//! - The multi-step question flow
//! - History and back navigation
//!
//! All mutable session state lives in one `Session` owned by the navigator.
//! There is one thread of control; every connector call blocks the loop.

use std::sync::Arc;

use reveal_core::{Context, DisplayConfig, Instruction, Outcome, Parameter};

use crate::connector::Connector;
use crate::credentials::CredentialStore;
use crate::error::{EngineError, EngineResult};
use crate::history::HistoryStack;
use crate::input::CommandLine;
use crate::registry::ConnectorRegistry;
use crate::render::numbered;
use crate::terminal::Terminal;

mod local;
mod questions;
mod resolve;

const PROMPT: &str = "> ";

// =============================================================================
// Session State
// =============================================================================

/// Mutable state of one interactive session.
#[derive(Default)]
pub struct Session {
    /// Active backend. `None` until bootstrap succeeds.
    pub connector: Option<Box<dyn Connector>>,

    /// Context whose command table is active.
    pub context: Context,

    /// Entity in focus.
    pub subject: Option<String>,

    /// Back-navigation record.
    pub history: HistoryStack,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.connector.is_some()
    }
}

/// What an executed instruction leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// An outcome to render as the next screen.
    Show(Outcome),

    /// Nothing to render; the next turn starts without options.
    Idle,

    /// The user asked to leave.
    Exit,
}

/// Result of one loop iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// Keep reading. Holds the outcome whose options are selectable next.
    Continue(Option<Outcome>),

    /// Stop the loop.
    Exit,
}

// =============================================================================
// Navigator
// =============================================================================

/// Interactive navigation engine.
pub struct Navigator<T: Terminal> {
    session: Session,
    io: T,
    registry: Arc<ConnectorRegistry>,
    credentials: Box<dyn CredentialStore>,
    display: DisplayConfig,

    /// Held while a question flow runs.
    asking: bool,
}

impl<T: Terminal> Navigator<T> {
    /// Create a disconnected navigator.
    pub fn new(
        io: T,
        registry: Arc<ConnectorRegistry>,
        credentials: Box<dyn CredentialStore>,
        display: DisplayConfig,
    ) -> Self {
        Self {
            session: Session::default(),
            io,
            registry,
            credentials,
            display,
            asking: false,
        }
    }

    /// Attach an already connected backend, skipping bootstrap.
    pub fn with_connector(mut self, connector: Box<dyn Connector>) -> Self {
        self.session.connector = Some(connector);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn context(&self) -> &Context {
        &self.session.context
    }

    pub fn subject(&self) -> Option<&str> {
        self.session.subject.as_deref()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.session.history
    }

    pub fn terminal(&self) -> &T {
        &self.io
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.io
    }

    // =========================================================================
    // Read-Eval Loop
    // =========================================================================

    /// Run session bootstrap.
    pub fn connect(&mut self) -> EngineResult<()> {
        self.connect_session()
    }

    /// Read and execute lines until the user exits or input ends.
    pub fn run(&mut self) -> EngineResult<()> {
        let mut current: Option<Outcome> = None;
        loop {
            let line = match self.io.read_line(PROMPT)? {
                Some(line) => line,
                None => {
                    tracing::info!("Input closed, leaving session");
                    return Ok(());
                }
            };

            match self.turn(&line, current.take()) {
                Ok(Turn::Continue(next)) => current = next,
                Ok(Turn::Exit) => return Ok(()),
                Err(EngineError::InputClosed) => {
                    tracing::info!("Input closed, leaving session");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Process one line of input against the outcome on screen.
    pub fn turn(&mut self, line: &str, current: Option<Outcome>) -> EngineResult<Turn> {
        let input = CommandLine::parse(line);
        if self.display.clear_screen {
            self.io.clear();
        }

        let instruction = match self.resolve(&input.command, current.as_ref()) {
            Some(instruction) => instruction,
            None => {
                tracing::debug!("No instruction for '{}'", input.command);
                self.io.print_error(&format!(
                    "ERROR: Invalid command '{}'. These are the available commands:",
                    input.command
                ));
                match self.help_fallback() {
                    Some(help) => help,
                    None => return Ok(Turn::Continue(current)),
                }
            }
        };

        let title = instruction.title.clone();
        let outcome = match self.execute(instruction, input.parameter)? {
            Flow::Show(outcome) => outcome,
            Flow::Idle => return Ok(Turn::Continue(None)),
            Flow::Exit => return Ok(Turn::Exit),
        };

        let Some(error) = outcome.error.clone() else {
            self.render(&outcome, title);
            return Ok(Turn::Continue(Some(outcome)));
        };

        tracing::warn!("Operation failed: {}", error);
        self.io.print_error(&format!("ERROR! {}", error));

        // One step back only; a failing fallback is reported, not chased.
        match self.go_back()? {
            Flow::Show(fallback) => {
                if let Some(error) = &fallback.error {
                    tracing::warn!("Fallback failed too: {}", error);
                    self.io.print_error(&format!("ERROR! {}", error));
                }
                self.render(&fallback, None);
                Ok(Turn::Continue(Some(fallback)))
            }
            Flow::Idle => Ok(Turn::Continue(None)),
            Flow::Exit => Ok(Turn::Exit),
        }
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Execute an instruction with the user's trailing text.
    pub fn execute(&mut self, instruction: Instruction, trailing: Option<String>) -> EngineResult<Flow> {
        let mut instruction = instruction;
        if instruction.parameter.is_none() {
            instruction.parameter = trailing.map(Parameter::Text);
        }
        if instruction.requires_history() {
            self.session.history.push(&instruction);
        }

        tracing::debug!(
            "Dispatching {} (context: {}, subject: {:?})",
            instruction.operation,
            instruction.context,
            instruction.subject
        );

        let flow = match instruction.local_operation() {
            Some(operation) => self.perform_local(operation, &mut instruction)?,
            None => self.perform_connector(&mut instruction)?,
        };

        if let Flow::Show(outcome) = &flow {
            self.session.subject = outcome.subject.clone();
            self.session.context = outcome.context.clone();
        }
        Ok(flow)
    }

    /// Dispatch to the active connector, running the question flow at most once.
    fn perform_connector(&mut self, instruction: &mut Instruction) -> EngineResult<Flow> {
        let Some(mut outcome) = self.dispatch(instruction) else {
            self.io
                .print_error("ERROR! Not connected. Type connect to open a connection");
            return Ok(Flow::Idle);
        };

        if outcome.needs_answers() {
            let questions = outcome.questions.take().unwrap_or_default();
            let answers = self.ask(questions)?;
            instruction.parameter = Some(Parameter::Answers(answers));

            outcome = match self.dispatch(instruction) {
                Some(outcome) => outcome,
                None => return Ok(Flow::Idle),
            };
            if outcome.needs_answers() {
                tracing::warn!(
                    "{} asked questions again after being answered",
                    instruction.operation
                );
                outcome.questions = None;
            }
        }

        Ok(Flow::Show(outcome))
    }

    fn dispatch(&mut self, instruction: &mut Instruction) -> Option<Outcome> {
        let connector = self.session.connector.as_mut()?;
        Some(connector.perform(instruction, &mut self.io))
    }

    /// Print an outcome's heading and numbered options.
    fn render(&mut self, outcome: &Outcome, title: Option<String>) {
        let heading = outcome
            .heading
            .clone()
            .or(title.filter(|_| !outcome.options.is_empty()));
        if let Some(heading) = heading {
            self.io.print(&heading);
        }
        if !outcome.options.is_empty() {
            let labels: Vec<&str> = outcome.options.iter().map(|o| o.display_label()).collect();
            self.io
                .print(&numbered(&labels, self.display.max_width).join("\n"));
        }
    }
}
