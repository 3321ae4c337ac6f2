//! Diagnostics of the gelfmt binary itself.
//!
//! Diagnostics always go to stderr (or the debug file) so they never mix
//! with GELF output on stdout.

use gelfmt_core::config::{LogFormat, LoggingConfig};
use gelfmt_core::{GelfFormatter, Profile};
use gelfmt_layer::GelfLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const DEBUG_LOG_PATH: &str = "/tmp/gelfmt-debug.log";

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(logging: &LoggingConfig, debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG_PATH)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
        tracing::info!("gelfmt debug log started, tail -f {DEBUG_LOG_PATH}");
        return Ok(());
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Text => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true);
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Gelf => {
            let layer = GelfLayer::new(GelfFormatter::from_profile(Profile::Basic))
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
    }
    Ok(())
}
