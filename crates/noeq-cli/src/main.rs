mod config;
mod telemetry;

use anyhow::Context;
use clap::Parser;
use config::{CliArgs, CliConfig};
use noeq::Client;
use std::io::{BufWriter, Write};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry()?;

    tracing::debug!(
        addrs = ?config.addrs,
        count = config.count,
        batches = config.batches,
        "starting"
    );

    let client = Client::new(&config.token, &config.addrs)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for batch in 0..config.batches {
        let ids = client
            .generate(config.count)
            .with_context(|| format!("batch {batch} of {} failed", config.batches))?;
        for id in ids {
            writeln!(out, "{id}")?;
        }
    }
    out.flush()?;
    Ok(())
}
