use crate::process::ExitStatus;

/// Per-session bookkeeping threaded through the read loop.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    line_number: usize,
    last_status: ExitStatus,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a line read from input and returns its 1-based number.
    pub fn next_line(&mut self) -> usize {
        self.line_number += 1;
        self.line_number
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn last_status(&self) -> ExitStatus {
        self.last_status
    }

    pub fn record(&mut self, status: ExitStatus) {
        self.last_status = status;
    }
}
