mod tokenizer;

pub use tokenizer::{tokenize, Command};

use std::io::{self, BufRead};

/// Reads standard input one raw line at a time.
pub struct LineReader<R> {
    inner: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads the next line into `buf`, replacing its contents.
    ///
    /// The terminator is kept; a last line without one is still returned.
    /// `Ok(false)` means end of input.
    pub fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        buf.clear();
        let read = self.inner.read_until(b'\n', buf)?;
        Ok(read > 0)
    }
}
