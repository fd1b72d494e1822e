use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset: transport decisions at debug, the rest at info.
pub const DEFAULT_FILTER: &str = "info,service=debug,reqwest=warn,hyper_util=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Human-readable compact logs on stderr.
///
/// Stdout is left to command output so listings can be piped.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

/// Structured JSON logs on stderr, one object per event.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .json()
        .with_current_span(true)
        .with_writer(io::stderr)
        .try_init();
}
