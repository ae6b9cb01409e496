//! Logging setup
//!
//! Diagnostics go through `tracing` and are written to stderr so they never
//! mix with the progress lines printed on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// `RUST_LOG` takes precedence. Otherwise `verbose` selects `debug` for this
/// crate and the default is `warn`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}

const fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,filament_split_lib=debug,filament_split=debug"
    } else {
        "warn"
    }
}
