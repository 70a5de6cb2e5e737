use anyhow::bail;
use clap::Parser;

/// Command-line options for the `noeq` binary.
///
/// Every option can also come from the environment (or a `.env` file in the
/// working directory).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "noeq",
    version,
    about = "Fetch unique IDs from a noeq server"
)]
pub struct CliArgs {
    /// Comma-delimited list of `host:port` server addresses. One is picked at
    /// random for every new connection.
    ///
    /// Environment variable: `NOEQ_ADDRS`
    #[arg(long, env = "NOEQ_ADDRS", value_delimiter = ',', default_value = "127.0.0.1:4444")]
    pub addrs: Vec<String>,

    /// Shared-secret auth token (at most 255 bytes). Empty disables auth.
    ///
    /// Environment variable: `NOEQ_TOKEN`
    #[arg(long, env = "NOEQ_TOKEN", default_value_t = String::new(), hide_env_values = true)]
    pub token: String,

    /// Number of IDs to request per round trip.
    ///
    /// Environment variable: `NOEQ_COUNT`
    #[arg(short = 'n', long, env = "NOEQ_COUNT", default_value_t = 1)]
    pub count: u8,

    /// Number of sequential requests to issue.
    ///
    /// Environment variable: `NOEQ_BATCHES`
    #[arg(long, env = "NOEQ_BATCHES", default_value_t = 1)]
    pub batches: usize,
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub addrs: Vec<String>,
    pub token: String,
    pub count: u8,
    pub batches: usize,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let addrs: Vec<String> = args
            .addrs
            .into_iter()
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty())
            .collect();

        if addrs.is_empty() {
            bail!("NOEQ_ADDRS must contain at least one address");
        }

        if args.token.len() > noeq::MAX_TOKEN_LEN {
            bail!(
                "NOEQ_TOKEN is {} bytes long (max = {})",
                args.token.len(),
                noeq::MAX_TOKEN_LEN
            );
        }

        Ok(Self {
            addrs,
            token: args.token,
            count: args.count,
            batches: args.batches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> anyhow::Result<CliConfig> {
        let args = CliArgs::try_parse_from(std::iter::once("noeq").chain(argv.iter().copied()))?;
        CliConfig::try_from(args)
    }

    #[test]
    fn splits_and_trims_addresses() {
        let cfg = parse(&["--addrs", "a:1, b:2,,c:3", "-n", "7"]).unwrap();
        assert_eq!(cfg.addrs, ["a:1", "b:2", "c:3"]);
        assert_eq!(cfg.count, 7);
        assert_eq!(cfg.batches, 1);
    }

    #[test]
    fn rejects_blank_addresses() {
        assert!(parse(&["--addrs", " , "]).is_err());
    }

    #[test]
    fn rejects_oversized_token() {
        let token = "x".repeat(256);
        assert!(parse(&["--addrs", "a:1", "--token", &token]).is_err());
    }

    #[test]
    fn count_is_bounded_by_a_byte() {
        assert!(parse(&["--addrs", "a:1", "-n", "256"]).is_err());
        assert_eq!(parse(&["--addrs", "a:1", "-n", "255"]).unwrap().count, 255);
    }
}
