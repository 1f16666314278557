//! Describe command - Show metadata of a report suite
//!
//! Metrics, dimensions and segments are fetched concurrently. Without
//! `--full` only their counts are printed.

use anyhow::{Context, Result};
use clap::Args;
use rsuite_config::Config;
use serde::Serialize;

use super::{connect, print_json};

/// Describe command arguments
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Report suite id
    #[arg(value_name = "RSID")]
    rsid: String,

    /// Print every metric, dimension and segment record
    #[arg(long)]
    full: bool,
}

#[derive(Serialize)]
struct Counts<'a> {
    rsid: &'a str,
    metrics: usize,
    dimensions: usize,
    segments: usize,
}

/// Run the describe command
pub async fn run(args: DescribeArgs, config: &Config) -> Result<()> {
    let account = connect(config)?;
    let suite = account.suite(&args.rsid);

    let metadata = suite
        .fill()
        .await
        .with_context(|| format!("failed to fetch metadata of {}", args.rsid))?;

    if args.full {
        print_json(&metadata)
    } else {
        print_json(&Counts {
            rsid: suite.rsid(),
            metrics: metadata.metrics.len(),
            dimensions: metadata.dimensions.len(),
            segments: metadata.segments.len(),
        })
    }
}
