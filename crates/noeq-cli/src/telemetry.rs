//! Console logging for the CLI.
//!
//! Logs go to stderr so stdout carries nothing but IDs. The filter comes from
//! `RUST_LOG` and defaults to `warn`; `RUST_LOG=noeq=debug` shows every
//! connect and dropped connection.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false),
        )
        .try_init()?;
    Ok(())
}
