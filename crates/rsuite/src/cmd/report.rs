//! Report command - Run one page of a report
//!
//! Takes the same flags as `rsuite compile`; use `--page` to walk through
//! later pages.

use anyhow::{Context, Result};
use clap::Args;
use rsuite_config::Config;
use tracing::info;

use super::compile::QueryArgs;
use super::{connect, print_json};

/// Report command arguments
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    query: QueryArgs,
}

/// Run the report command
pub async fn run(args: ReportArgs, config: &Config) -> Result<()> {
    let query = args.query.build_query(&config.query)?;
    let account = connect(config)?;

    let page = account
        .reports()
        .run(&query)
        .await
        .context("report request failed")?;

    print_json(&page)?;

    if page.has_next() {
        info!(
            next_page = page.number.saturating_add(1),
            total_pages = page.total_pages,
            "more pages available (use --page)"
        );
    }
    eprintln!(
        "\n{} row(s), page {} of {}",
        page.rows.len(),
        page.number.saturating_add(1),
        page.total_pages.max(1)
    );
    Ok(())
}
