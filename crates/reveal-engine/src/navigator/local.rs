//! Operations the navigator performs itself.

use reveal_core::{Context, HelpIndex, Instruction, LocalOperation, Outcome};

use super::{Flow, Navigator};
use crate::bootstrap;
use crate::commands::{MAIN_MENU, MENU};
use crate::error::EngineResult;
use crate::render::{help_lines, title, wrap_lines};
use crate::terminal::Terminal;

impl<T: Terminal> Navigator<T> {
    pub(super) fn perform_local(
        &mut self,
        operation: LocalOperation,
        instruction: &mut Instruction,
    ) -> EngineResult<Flow> {
        match operation {
            LocalOperation::ShowHelp => Ok(self.show_help(instruction)),
            LocalOperation::ShowMenu => Ok(self.show_menu(instruction)),
            LocalOperation::GoBack => self.go_back(),
            LocalOperation::Connect => {
                self.connect_session()?;
                Ok(Flow::Idle)
            }
            LocalOperation::Close => {
                tracing::info!("Exit requested");
                Ok(Flow::Exit)
            }
        }
    }

    /// Print the commands available at the current position.
    fn show_help(&mut self, instruction: &Instruction) -> Flow {
        let index = instruction.help.clone().unwrap_or_else(|| HelpIndex {
            commands: self.available_commands(),
            shortcuts: self.available_shortcuts(),
        });

        let mut lines = vec![title(
            "help",
            &self.session.context,
            self.session.subject.as_deref(),
        )];
        lines.extend(help_lines(&index));
        let text = wrap_lines(&lines.join("\n"), self.display.max_width).join("\n");
        self.io.print(&text);

        Flow::Show(Outcome::new(
            instruction.subject.clone(),
            instruction.context.clone(),
        ))
    }

    /// List a connector menu. The subject in focus is kept.
    fn show_menu(&mut self, instruction: &Instruction) -> Flow {
        let name = instruction.parameter_text().unwrap_or(MAIN_MENU);
        let menu = self
            .session
            .connector
            .as_ref()
            .and_then(|connector| connector.menu(name));

        let Some(menu) = menu else {
            tracing::debug!("Menu '{}' is not available", name);
            self.io
                .print_error(&format!("ERROR! Menu '{}' is not available", name));
            return Flow::Idle;
        };

        let options = menu
            .iter()
            .map(|(label, entry)| entry.clone().with_label(label))
            .collect();
        Flow::Show(Outcome::global(instruction.subject.clone()).with_options(options))
    }

    /// Re-execute the screen before the current one.
    ///
    /// With fewer than two entries there is nothing to return to and the
    /// main menu is shown instead.
    pub fn go_back(&mut self) -> EngineResult<Flow> {
        if self.session.history.len() > 1 {
            self.session.history.pop();
            if let Some(previous) = self.session.history.pop() {
                return self.execute(previous, None);
            }
        }

        self.io.print("History for this session is empty. Main menu:");
        match self.resolve(MENU, None) {
            Some(menu) => self.execute(menu, None),
            None => Ok(Flow::Idle),
        }
    }

    /// Run bootstrap and start over at the top of the new connection.
    pub(super) fn connect_session(&mut self) -> EngineResult<()> {
        let connector = bootstrap::establish(
            &mut self.io,
            &self.registry,
            self.credentials.as_mut(),
            self.display.max_width,
        )?;

        self.session.connector = Some(connector);
        self.session.context = Context::global();
        self.session.subject = None;
        self.session.history.clear();

        self.io.print("Type menu to show the main menu options");
        self.io.print("Type ? or help for the help menu");
        Ok(())
    }
}
