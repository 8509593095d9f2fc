/// A non-empty argument list borrowed from one input line.
///
/// Token 0 is the program or builtin name. The tokens are slices of the
/// line they were parsed from, so a `Command` cannot outlive that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'line> {
    argv: Vec<&'line [u8]>,
}

impl<'line> Command<'line> {
    pub fn name(&self) -> &'line [u8] {
        // argv is never empty, see `tokenize`
        self.argv[0]
    }

    pub fn args(&self) -> &[&'line [u8]] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[&'line [u8]] {
        &self.argv
    }

    /// The command name for diagnostics.
    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(self.name()).into_owned()
    }
}

fn is_separator(byte: &u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

/// Splits a raw line on runs of spaces and tabs.
///
/// A single trailing `\n` is dropped first. No quoting, escaping or
/// expansion happens. Returns `None` for empty or whitespace-only lines.
pub fn tokenize(line: &[u8]) -> Option<Command<'_>> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);

    let argv: Vec<&[u8]> = line
        .split(is_separator)
        .filter(|token| !token.is_empty())
        .collect();

    if argv.is_empty() {
        None
    } else {
        Some(Command { argv })
    }
}
