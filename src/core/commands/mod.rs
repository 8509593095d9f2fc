use std::io::Write;

use thiserror::Error;
use tracing::debug;

mod env;
mod exit;

pub use env::EnvCommand;
pub use exit::ExitCommand;

use crate::core::env::Environment;
use crate::core::state::Session;
use crate::input::Command;
use crate::process::ExitStatus;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// What a builtin asks the read loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    Continue(ExitStatus),
    Exit(ExitStatus),
}

/// Result of offering a command to the builtin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled(ExitStatus),
    Exit(ExitStatus),
    NotABuiltin,
}

/// State a builtin may read, plus where it writes.
pub struct CommandContext<'a> {
    pub session: &'a Session,
    pub env: &'a Environment,
    pub out: &'a mut dyn Write,
}

pub trait BuiltinCommand {
    fn execute(
        &self,
        args: &[&[u8]],
        ctx: &mut CommandContext<'_>,
    ) -> Result<BuiltinOutcome, CommandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit(ExitCommand),
    Env(EnvCommand),
}

impl Builtin {
    pub fn lookup(name: &[u8]) -> Option<Self> {
        match name {
            b"exit" => Some(Builtin::Exit(ExitCommand::new())),
            b"env" => Some(Builtin::Env(EnvCommand::new())),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Exit(_) => "exit",
            Builtin::Env(_) => "env",
        }
    }
}

impl BuiltinCommand for Builtin {
    fn execute(
        &self,
        args: &[&[u8]],
        ctx: &mut CommandContext<'_>,
    ) -> Result<BuiltinOutcome, CommandError> {
        match self {
            Builtin::Exit(cmd) => cmd.execute(args, ctx),
            Builtin::Env(cmd) => cmd.execute(args, ctx),
        }
    }
}

/// The closed set of commands the shell runs itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinRegistry;

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Runs `command` if it names a builtin; external lookup is skipped then.
    pub fn try_dispatch(
        &self,
        command: &Command<'_>,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Dispatch, CommandError> {
        let Some(builtin) = Builtin::lookup(command.name()) else {
            return Ok(Dispatch::NotABuiltin);
        };

        debug!(builtin = builtin.name(), "dispatching builtin");
        Ok(match builtin.execute(command.args(), ctx)? {
            BuiltinOutcome::Continue(status) => Dispatch::Handled(status),
            BuiltinOutcome::Exit(status) => Dispatch::Exit(status),
        })
    }
}
