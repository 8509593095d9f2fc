use std::io::{self, BufRead, StdinLock, Write};

use tracing::{debug, warn};

mod executor;

use crate::{
    core::{commands::BuiltinRegistry, config::ShellConfig, env::Environment, state::Session},
    error::ShellError,
    input::{tokenize, LineReader},
    process::{signal, ExitStatus, ProcessRunner},
};

use executor::{CommandHandler, Flow};

/// The read loop: prompt, read a line, run it, repeat until end of input
/// or `exit`.
pub struct Shell<R, W, E> {
    pub(crate) config: ShellConfig,
    pub(crate) env: Environment,
    pub(crate) session: Session,
    pub(crate) builtins: BuiltinRegistry,
    pub(crate) runner: ProcessRunner,
    pub(crate) input: LineReader<R>,
    pub(crate) out: W,
    pub(crate) err: E,
}

impl Shell<StdinLock<'static>, io::Stdout, io::Stderr> {
    /// A shell on the real standard streams and inherited environment.
    pub fn from_env() -> Result<Self, ShellError> {
        Self::new(
            ShellConfig::from_env(),
            Environment::from_os(),
            io::stdin().lock(),
            io::stdout(),
            io::stderr(),
        )
    }
}

impl<R: BufRead, W: Write, E: Write> Shell<R, W, E> {
    pub fn new(
        config: ShellConfig,
        env: Environment,
        input: R,
        out: W,
        err: E,
    ) -> Result<Self, ShellError> {
        let runner = ProcessRunner::new(config.prog_name.clone(), &env)?;
        Ok(Shell {
            config,
            env,
            session: Session::new(),
            builtins: BuiltinRegistry::new(),
            runner,
            input: LineReader::new(input),
            out,
            err,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the session and returns the status the process should exit with.
    pub fn run(&mut self) -> ExitStatus {
        if self.config.interactive {
            signal::ignore_interrupt();
        }

        let mut line = Vec::new();
        loop {
            if let Err(e) = self.prompt() {
                warn!(error = %e, "failed to write prompt");
            }

            match self.input.read_line(&mut line) {
                Ok(true) => {}
                Ok(false) => {
                    if self.config.interactive {
                        let _ = self.out.write_all(b"\n").and_then(|()| self.out.flush());
                    }
                    break;
                }
                Err(e) => {
                    let _ = writeln!(self.err, "{}: {}", self.config.prog_name, e);
                    break;
                }
            }

            let line_number = self.session.next_line();
            let Some(command) = tokenize(&line) else {
                continue;
            };

            if let Flow::Exit = self.execute_command(&command, line_number) {
                break;
            }
        }

        let status = self.session.last_status();
        debug!(%status, lines = self.session.line_number(), "session ended");
        status
    }

    fn prompt(&mut self) -> io::Result<()> {
        if !self.config.interactive {
            return Ok(());
        }
        self.out.write_all(self.config.prompt.as_bytes())?;
        self.out.flush()
    }
}
