use super::{BuiltinCommand, BuiltinOutcome, CommandContext, CommandError};
use crate::process::ExitStatus;

/// Prints the inherited environment, one `NAME=VALUE` per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvCommand;

impl Default for EnvCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCommand {
    pub fn new() -> Self {
        Self
    }
}

impl BuiltinCommand for EnvCommand {
    fn execute(
        &self,
        _args: &[&[u8]],
        ctx: &mut CommandContext<'_>,
    ) -> Result<BuiltinOutcome, CommandError> {
        ctx.env.write_to(&mut *ctx.out)?;
        Ok(BuiltinOutcome::Continue(ExitStatus::SUCCESS))
    }
}
