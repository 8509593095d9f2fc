use std::ffi::{CStr, CString, NulError, OsStr};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;

use libc::c_char;

extern "C" {
    static environ: *const *const c_char;
}

/// One raw environment string. Entries without `=` are kept verbatim but
/// have no name.
#[derive(Clone, Debug, PartialEq, Eq)]
struct EnvEntry {
    raw: Box<[u8]>,
    separator: Option<usize>,
}

impl EnvEntry {
    fn new(raw: &[u8]) -> Self {
        Self {
            raw: raw.into(),
            separator: raw.iter().position(|&b| b == b'='),
        }
    }

    fn name(&self) -> Option<&[u8]> {
        self.separator.map(|at| &self.raw[..at])
    }

    fn value(&self) -> Option<&[u8]> {
        self.separator.map(|at| &self.raw[at + 1..])
    }
}

/// Read-only snapshot of the process environment.
///
/// Entries keep their original order and bytes. Nothing in the shell
/// mutates it after startup; children receive it unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    entries: Vec<EnvEntry>,
}

impl Environment {
    /// Captures `environ` exactly as the OS handed it to this process.
    ///
    /// Must run before anything calls `setenv`; the shell never does.
    pub fn from_os() -> Self {
        let mut entries = Vec::new();
        unsafe {
            let mut cursor = environ;
            while !cursor.is_null() && !(*cursor).is_null() {
                entries.push(EnvEntry::new(CStr::from_ptr(*cursor).to_bytes()));
                cursor = cursor.add(1);
            }
        }
        Self { entries }
    }

    /// Builds an environment from raw `NAME=VALUE` entries, kept verbatim.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| EnvEntry::new(entry.as_ref()))
            .collect();
        Self { entries }
    }

    /// Value of the first entry named `name`.
    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.entries
            .iter()
            .find(|entry| entry.name() == Some(name.as_bytes()))
            .and_then(|entry| entry.value())
            .map(OsStr::from_bytes)
    }

    /// Raw `NAME=VALUE` entries in original order.
    pub fn entries(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|entry| &*entry.raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes one entry per line, byte for byte.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for entry in self.entries() {
            out.write_all(entry)?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }

    /// The entry list handed to `execve`.
    pub fn to_envp(&self) -> Result<Vec<CString>, NulError> {
        self.entries().map(|entry| CString::new(entry)).collect()
    }
}
