use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter variable, e.g. `HSH_LOG=debug` or `HSH_LOG=hsh::process=trace`.
pub const LOG_ENV: &str = "HSH_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"))
}

/// Installs the stderr subscriber. Logging is off unless `HSH_LOG` is set,
/// so the shell's own diagnostics are the only thing on stderr by default.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter())
        .try_init();
}
