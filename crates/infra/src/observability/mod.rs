//! Tracing subscriber setup
//!
//! Library crates only emit `tracing` events; the binary that embeds them
//! calls [`init_tracing`] once at startup.

use tempo_domain::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber writing to stderr
///
/// `RUST_LOG` takes precedence over `config.level`. An invalid directive in
/// `config.level` falls back to `info`. Returns `false` when a global
/// subscriber was already installed, which makes repeated calls harmless.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().with_current_span(true).try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::debug!(level = %config.level, json = config.json, "Tracing initialised");
    }
    installed
}
