use std::ffi::{CStr, CString};
use std::io;
use std::ptr;

use libc::{c_char, c_int, pid_t};
use tracing::{debug, trace};

use super::{signal, ExitStatus, ProcessError, WaitStatus};
use crate::core::env::Environment;
use crate::input::Command;
use crate::path::ResolvedPath;

enum ForkReturn {
    Parent(pid_t),
    Child,
}

fn fork() -> io::Result<ForkReturn> {
    match unsafe { libc::fork() } {
        -1 => Err(io::Error::last_os_error()),
        0 => Ok(ForkReturn::Child),
        pid => Ok(ForkReturn::Parent(pid)),
    }
}

fn null_terminated(strings: &[CString]) -> Vec<*const c_char> {
    strings
        .iter()
        .map(|s| s.as_ptr())
        .chain(std::iter::once(ptr::null()))
        .collect()
}

/// Runs in the forked child and never returns.
///
/// Everything it touches was allocated before `fork`; only
/// async-signal-safe calls happen here.
fn exec_child(
    path: &CStr,
    argv: &[*const c_char],
    envp: &[*const c_char],
    diagnostic: &[u8],
) -> ! {
    signal::restore_child_defaults();

    unsafe {
        libc::execve(path.as_ptr(), argv.as_ptr(), envp.as_ptr());
    }

    let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
    unsafe {
        let reason = CStr::from_ptr(libc::strerror(errno));
        write_raw(libc::STDERR_FILENO, diagnostic);
        write_raw(libc::STDERR_FILENO, reason.to_bytes());
        write_raw(libc::STDERR_FILENO, b"\n");
        libc::_exit(127)
    }
}

fn write_raw(fd: c_int, mut bytes: &[u8]) {
    while !bytes.is_empty() {
        let written = unsafe { libc::write(fd, bytes.as_ptr().cast(), bytes.len()) };
        if written <= 0 {
            return;
        }
        bytes = &bytes[written as usize..];
    }
}

/// A foreground process that has been started but not yet reaped.
#[derive(Debug)]
#[must_use = "a spawned child must be waited on"]
pub struct Child {
    pid: pid_t,
}

impl Child {
    /// Blocks until the child terminates and maps how it ended.
    pub fn wait(self) -> Result<ExitStatus, ProcessError> {
        let mut raw: c_int = 0;
        loop {
            if unsafe { libc::waitpid(self.pid, &mut raw, 0) } != -1 {
                break;
            }
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(ProcessError::Wait(err));
            }
        }

        let status = WaitStatus::from_raw(raw);
        debug!(pid = self.pid, ?status, "child terminated");
        Ok(status.into())
    }
}

/// Starts external programs with the session environment.
#[derive(Debug)]
pub struct ProcessRunner {
    prog_name: String,
    envp: Vec<CString>,
}

impl ProcessRunner {
    pub fn new(prog_name: impl Into<String>, env: &Environment) -> Result<Self, ProcessError> {
        let envp = env
            .to_envp()
            .map_err(|_| ProcessError::InvalidArgument)?;
        Ok(Self {
            prog_name: prog_name.into(),
            envp,
        })
    }

    /// Forks and replaces the child's image with `path`.
    ///
    /// Ctrl-C is ignored in the shell from here on; the child restores
    /// the default before `execve`. If `execve` fails the child reports
    /// it on stderr and exits with 127.
    pub fn spawn(
        &self,
        path: &ResolvedPath,
        command: &Command<'_>,
        line: usize,
    ) -> Result<Child, ProcessError> {
        let argv = command
            .argv()
            .iter()
            .map(|token| CString::new(*token))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ProcessError::InvalidArgument)?;
        let argv_ptrs = null_terminated(&argv);
        let envp_ptrs = null_terminated(&self.envp);
        let diagnostic = format!(
            "{}: {}: {}: ",
            self.prog_name,
            line,
            command.display_name()
        )
        .into_bytes();

        signal::ignore_interrupt();

        match fork().map_err(ProcessError::Fork)? {
            ForkReturn::Child => exec_child(path.as_c_str(), &argv_ptrs, &envp_ptrs, &diagnostic),
            ForkReturn::Parent(pid) => {
                trace!(pid, %path, argc = argv.len(), "spawned");
                Ok(Child { pid })
            }
        }
    }

    /// [`spawn`](Self::spawn) followed by [`Child::wait`].
    pub fn run(
        &self,
        path: &ResolvedPath,
        command: &Command<'_>,
        line: usize,
    ) -> Result<ExitStatus, ProcessError> {
        self.spawn(path, command, line)?.wait()
    }
}
