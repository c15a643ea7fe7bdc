//! Logging setup
//!
//! `RUST_LOG` wins over the level passed in, so a deployed shell can be
//! turned up without a rebuild.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber: human readable text, or JSON lines.
pub fn init_logging(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(env_filter);

    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
