use std::io::IsTerminal as _;

use tracing_subscriber::{filter::LevelFilter, EnvFilter};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, Default)]
pub struct TelemetryConfig {
    pub verbose: bool,
    pub pretty: bool,
}

/// Configures structured logging with runtime control via `RUST_LOG` environment variable.
///
/// Logs share stderr with the per-URL error lines, so the default is WARN.
/// `verbose` lowers it to DEBUG; `RUST_LOG` overrides both.
pub fn init_tracing(cfg: TelemetryConfig) -> Result<(), BoxError> {
    let directive = if cfg.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
    .into();

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(directive)
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr);

    if cfg.pretty {
        subscriber.pretty().try_init()?;
    } else {
        subscriber.try_init()?;
    }

    tracing::debug!("Tracing is set up");
    Ok(())
}
