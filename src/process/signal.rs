use libc::{signal, SIG_DFL, SIG_IGN};
use signal_hook::consts::{SIGINT, SIGPIPE};

/// Makes the shell itself immune to Ctrl-C.
///
/// The disposition survives `fork`, which is why every child calls
/// [`restore_child_defaults`] before replacing its image.
pub fn ignore_interrupt() {
    unsafe {
        signal(SIGINT, SIG_IGN);
    }
}

/// Child side, between `fork` and `execve`. Async-signal-safe.
///
/// SIGPIPE is reset too: the Rust runtime ignores it at startup and an
/// ignored disposition would leak into the new program.
pub fn restore_child_defaults() {
    unsafe {
        signal(SIGINT, SIG_DFL);
        signal(SIGPIPE, SIG_DFL);
    }
}
