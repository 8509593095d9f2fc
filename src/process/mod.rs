use std::fmt;

use thiserror::Error;

pub mod executor;
pub mod signal;

pub use executor::{Child, ProcessRunner};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("cannot fork: {0}")]
    Fork(std::io::Error),
    #[error("wait failed: {0}")]
    Wait(std::io::Error),
    #[error("argument contains a NUL byte")]
    InvalidArgument,
}

/// How a child process ended, as reported by `waitpid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    Exited(i32),
    Signaled(i32),
    Other,
}

impl WaitStatus {
    pub fn from_raw(status: libc::c_int) -> Self {
        if libc::WIFEXITED(status) {
            WaitStatus::Exited(libc::WEXITSTATUS(status))
        } else if libc::WIFSIGNALED(status) {
            WaitStatus::Signaled(libc::WTERMSIG(status))
        } else {
            WaitStatus::Other
        }
    }
}

/// Outcome of a command, in `0..=255`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExitStatus(u8);

impl ExitStatus {
    pub const SUCCESS: ExitStatus = ExitStatus(0);
    pub const FAILURE: ExitStatus = ExitStatus(1);
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);

    pub const fn new(code: u8) -> Self {
        ExitStatus(code)
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    pub const fn success(self) -> bool {
        self.0 == 0
    }
}

impl From<WaitStatus> for ExitStatus {
    fn from(status: WaitStatus) -> Self {
        match status {
            WaitStatus::Exited(code) => ExitStatus((code & 0xff) as u8),
            WaitStatus::Signaled(signal) => {
                ExitStatus(128u32.saturating_add(signal.max(0) as u32).min(255) as u8)
            }
            WaitStatus::Other => ExitStatus::FAILURE,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.0)
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_hook::consts::{SIGINT, SIGKILL};

    #[test]
    fn test_exit_code_passes_through() {
        assert_eq!(ExitStatus::from(WaitStatus::Exited(0)), ExitStatus::SUCCESS);
        assert_eq!(ExitStatus::from(WaitStatus::Exited(3)).code(), 3);
        assert_eq!(ExitStatus::from(WaitStatus::Exited(255)).code(), 255);
    }

    #[test]
    fn test_signal_maps_above_128() {
        assert_eq!(ExitStatus::from(WaitStatus::Signaled(SIGKILL)).code(), 137);
        assert_eq!(ExitStatus::from(WaitStatus::Signaled(SIGINT)).code(), 130);
        assert_eq!(ExitStatus::from(WaitStatus::Signaled(200)).code(), 255);
    }

    #[test]
    fn test_untranslatable_is_failure() {
        assert_eq!(ExitStatus::from(WaitStatus::Other), ExitStatus::FAILURE);
    }

    #[test]
    fn test_raw_wait_status_decoding() {
        // Linux encoding: exit code in bits 8..16, signal in the low 7 bits
        assert_eq!(WaitStatus::from_raw(3 << 8), WaitStatus::Exited(3));
        assert_eq!(WaitStatus::from_raw(SIGKILL), WaitStatus::Signaled(SIGKILL));
        // stopped: 0x7f in the low byte
        assert_eq!(WaitStatus::from_raw(0x137f), WaitStatus::Other);
    }

    #[test]
    fn test_process_error_display() {
        let errors = vec![
            ProcessError::Fork(std::io::Error::from_raw_os_error(libc::EAGAIN)),
            ProcessError::Wait(std::io::Error::from_raw_os_error(libc::ECHILD)),
            ProcessError::InvalidArgument,
        ];
        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
