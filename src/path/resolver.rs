use std::ffi::{CStr, CString, OsStr};
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, trace};

use crate::core::env::Environment;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("not found")]
    NotFound(String),
}

/// Location of an executable, ready to hand to `execve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath(CString);

impl ResolvedPath {
    pub fn as_c_str(&self) -> &CStr {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(OsStr::from_bytes(self.0.as_bytes()))
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path().display())
    }
}

/// Executable means: exists, is not a directory, and `access(X_OK)` agrees.
fn executable(candidate: Vec<u8>) -> Option<ResolvedPath> {
    let candidate = CString::new(candidate).ok()?;
    let path = Path::new(OsStr::from_bytes(candidate.as_bytes()));
    let metadata = std::fs::metadata(path).ok()?;
    if metadata.is_dir() {
        return None;
    }
    if unsafe { libc::access(candidate.as_ptr(), libc::X_OK) } != 0 {
        return None;
    }
    Some(ResolvedPath(candidate))
}

/// Turns a command name into the executable to launch.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'env> {
    env: &'env Environment,
}

impl<'env> PathResolver<'env> {
    pub fn new(env: &'env Environment) -> Self {
        Self { env }
    }

    /// Names containing `/` are taken literally and PATH is not consulted.
    /// Otherwise each PATH directory is tried in order and the first
    /// executable `<dir>/<cmd>` wins. Empty PATH components are skipped.
    pub fn resolve(&self, cmd: &[u8]) -> Result<ResolvedPath, PathError> {
        let not_found = || PathError::NotFound(String::from_utf8_lossy(cmd).into_owned());

        if cmd.contains(&b'/') {
            trace!(cmd = %String::from_utf8_lossy(cmd), "literal path");
            return executable(cmd.to_vec()).ok_or_else(not_found);
        }

        let Some(search_path) = self.env.get("PATH").filter(|value| !value.is_empty()) else {
            debug!("PATH is unset or empty");
            return Err(not_found());
        };

        let found = search_path
            .as_bytes()
            .split(|&b| b == b':')
            .filter(|dir| !dir.is_empty())
            .find_map(|dir| {
                let mut candidate = Vec::with_capacity(dir.len() + 1 + cmd.len());
                candidate.extend_from_slice(dir);
                candidate.push(b'/');
                candidate.extend_from_slice(cmd);
                executable(candidate)
            });

        match found {
            Some(path) => {
                debug!(%path, "resolved");
                Ok(path)
            }
            None => Err(not_found()),
        }
    }
}
