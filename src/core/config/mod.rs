use std::ffi::OsString;
use std::io::IsTerminal;

pub const PROMPT: &str = "#cisfun$ ";
pub const DEFAULT_PROG_NAME: &str = "hsh";

/// Startup settings. There is no config file and no flags; everything
/// comes from argument 0 and whether stdin is a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prog_name: String,
    pub interactive: bool,
    pub prompt: &'static str,
}

impl ShellConfig {
    pub fn new(prog_name: impl Into<String>, interactive: bool) -> Self {
        Self {
            prog_name: prog_name.into(),
            interactive,
            prompt: PROMPT,
        }
    }

    /// Builds the config from the process arguments and stdin.
    pub fn from_env() -> Self {
        Self::from_args(std::env::args_os(), std::io::stdin().is_terminal())
    }

    pub fn from_args<I>(args: I, interactive: bool) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let prog_name = args
            .into_iter()
            .next()
            .map(|arg0| arg0.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PROG_NAME.to_string());
        Self::new(prog_name, interactive)
    }
}
