use super::{BuiltinCommand, BuiltinOutcome, CommandContext, CommandError};

/// Ends the session with the status of the last command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl BuiltinCommand for ExitCommand {
    fn execute(
        &self,
        _args: &[&[u8]],
        ctx: &mut CommandContext<'_>,
    ) -> Result<BuiltinOutcome, CommandError> {
        Ok(BuiltinOutcome::Exit(ctx.session.last_status()))
    }
}
