//! rsuite - command line client for the analytics reporting API
//!
//! # Usage
//!
//! ```bash
//! # List report suites
//! rsuite suites
//!
//! # Metric, dimension and segment metadata of one suite
//! rsuite describe examplersid --full
//!
//! # Print the JSON body of a report request without sending it
//! rsuite compile --suite examplersid --dimension variables/page \
//!     --metric metrics/pageviews --range 7d --search "contains:'red'"
//!
//! # Run one page of a report
//! rsuite report --suite examplersid --dimension variables/page \
//!     --metric metrics/pageviews --range mtd --limit 20
//! ```

mod cmd;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rsuite_config::{Config, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default config locations, tried in order when --config is not given
const DEFAULT_CONFIG_PATHS: &[&str] = &["rsuite.toml", "configs/rsuite.toml"];

/// rsuite - analytics reporting API client
#[derive(Parser, Debug)]
#[command(name = "rsuite")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// API key, overrides [api] api_key
    #[arg(long, global = true, env = "RSUITE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Global company id, overrides [api] company_id
    #[arg(long, global = true, env = "RSUITE_COMPANY_ID")]
    company_id: Option<String>,

    /// Bearer token, overrides [api] token
    #[arg(long, global = true, env = "RSUITE_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List report suites of the company
    Suites(cmd::suites::SuitesArgs),

    /// Show metrics, dimensions and segments of a report suite
    Describe(cmd::describe::DescribeArgs),

    /// Print the report request built from flags (no network)
    Compile(cmd::compile::QueryArgs),

    /// Run one page of a report
    Report(cmd::report::ReportArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    config.api = config
        .api
        .with_overrides(cli.api_key, cli.company_id, cli.token);

    let log_level = resolve_log_level(cli.log_level.as_deref(), &config);
    init_logging(&log_level, config.log.format)?;

    match cli.command {
        Command::Suites(args) => cmd::suites::run(args, &config).await,
        Command::Describe(args) => cmd::describe::run(args, &config).await,
        Command::Compile(args) => cmd::compile::run(args, &config),
        Command::Report(args) => cmd::report::run(args, &config).await,
    }
}

/// Load the config file, or defaults when none is given or found
fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        return Config::from_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()));
    }

    for candidate in DEFAULT_CONFIG_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            return Config::from_file(path)
                .with_context(|| format!("failed to load config: {}", path.display()));
        }
    }

    Ok(Config::default())
}

fn resolve_log_level(cli_level: Option<&str>, config: &Config) -> String {
    // CLI flag takes precedence
    match cli_level {
        Some(level) => level.to_string(),
        None => config.log.level.as_str().to_string(),
    }
}

/// Initialize the tracing subscriber; logs go to stderr
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Console => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    Ok(())
}
