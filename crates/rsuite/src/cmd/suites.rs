//! Suites command - List report suites of the company

use anyhow::{Context, Result};
use clap::Args;
use rsuite_config::Config;
use serde::Serialize;

use super::{connect, print_json};

/// Suites command arguments
#[derive(Args, Debug)]
pub struct SuitesArgs {}

#[derive(Serialize)]
struct SuiteSummary<'a> {
    rsid: &'a str,
    name: Option<&'a str>,
}

/// Run the suites command
pub async fn run(_args: SuitesArgs, config: &Config) -> Result<()> {
    let account = connect(config)?;
    let suites = account
        .list_report_suites()
        .await
        .context("failed to list report suites")?;

    let summary: Vec<SuiteSummary<'_>> = suites
        .iter()
        .map(|suite| SuiteSummary {
            rsid: suite.rsid(),
            name: suite.name(),
        })
        .collect();

    print_json(&summary)?;
    eprintln!("\n{} report suite(s)", summary.len());
    Ok(())
}
