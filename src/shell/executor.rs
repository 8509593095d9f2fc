use std::io::{BufRead, Write};

use tracing::warn;

use crate::core::commands::{BuiltinOutcome, CommandContext, Dispatch};
use crate::error::ShellError;
use crate::input::Command;
use crate::path::PathResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, command: &Command<'_>, line: usize) -> Flow;
}

impl<R: BufRead, W: Write, E: Write> CommandHandler for super::Shell<R, W, E> {
    fn execute_command(&mut self, command: &Command<'_>, line: usize) -> Flow {
        match self.dispatch(command, line) {
            Ok(BuiltinOutcome::Exit(status)) => {
                self.session.record(status);
                Flow::Exit
            }
            Ok(BuiltinOutcome::Continue(status)) => {
                self.session.record(status);
                Flow::Continue
            }
            Err(error) => {
                self.report(command, line, &error);
                self.session.record(error.status());
                Flow::Continue
            }
        }
    }
}

impl<R: BufRead, W: Write, E: Write> super::Shell<R, W, E> {
    /// Builtins first; on a miss, resolve and run in the foreground.
    fn dispatch(
        &mut self,
        command: &Command<'_>,
        line: usize,
    ) -> Result<BuiltinOutcome, ShellError> {
        let mut ctx = CommandContext {
            session: &self.session,
            env: &self.env,
            out: &mut self.out,
        };
        match self.builtins.try_dispatch(command, &mut ctx)? {
            Dispatch::Handled(status) => return Ok(BuiltinOutcome::Continue(status)),
            Dispatch::Exit(status) => return Ok(BuiltinOutcome::Exit(status)),
            Dispatch::NotABuiltin => {}
        }

        let path = PathResolver::new(&self.env).resolve(command.name())?;
        self.out.flush()?;
        let status = self.runner.run(&path, command, line)?;
        Ok(BuiltinOutcome::Continue(status))
    }

    fn report(&mut self, command: &Command<'_>, line: usize, error: &ShellError) {
        warn!(line, command = %command.display_name(), %error, "command failed");
        let _ = writeln!(
            self.err,
            "{}: {}: {}: {}",
            self.config.prog_name,
            line,
            command.display_name(),
            error
        );
        let _ = self.err.flush();
    }
}
