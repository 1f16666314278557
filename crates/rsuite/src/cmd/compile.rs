//! Compile command - Print the report request built from flags
//!
//! Nothing is sent; the output is the JSON body `rsuite report` would post.
//!
//! # Usage
//!
//! ```bash
//! rsuite compile --suite examplersid --dimension variables/page \
//!     --metric metrics/pageviews --metric metrics/visits \
//!     --range 2024-01-01,2024-01-31 \
//!     --search "contains:'red'" --search "contains:'green'" --any \
//!     --sort desc --limit 10
//! ```

use anyhow::{Context, Result};
use clap::Args;
use rsuite_config::{Config, QueryDefaults};
use rsuite_query::{
    Clause, Conjunction, Criterion, DateRange, DimensionFilter, Metric, Query, SortMode,
};

use super::print_json;

/// Flags describing one report query
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Report suite id (default: [query] suite_id)
    #[arg(long)]
    suite: Option<String>,

    /// Dimension to report on (e.g. variables/page)
    #[arg(long)]
    dimension: String,

    /// Metric to include; repeat for more columns
    #[arg(long = "metric", required = true)]
    metrics: Vec<String>,

    /// Date range: today, yesterday, wtd, mtd, qtd, ytd, 7d, 24h, 2w or YYYY-MM-DD,YYYY-MM-DD
    #[arg(long)]
    range: Option<String>,

    /// Segment applied to the whole report; repeatable
    #[arg(long = "segment")]
    segments: Vec<String>,

    /// Search clause as <operator>:<operand>, e.g. "contains:'red'"; repeatable
    #[arg(long = "search")]
    searches: Vec<String>,

    /// Join search clauses with OR instead of AND
    #[arg(long)]
    any: bool,

    /// Rows per page (default: [query] limit)
    #[arg(long, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// Dimension sort order (asc, desc)
    #[arg(long, default_value = "asc")]
    sort: String,

    /// Zero based page to request
    #[arg(long, default_value_t = 0)]
    page: u32,
}

impl QueryArgs {
    /// Build the query, falling back to config defaults for suite and limit
    pub fn build_query(&self, defaults: &QueryDefaults) -> Result<Query> {
        let suite = self
            .suite
            .clone()
            .or_else(|| defaults.suite_id.clone())
            .context("no report suite given (use --suite or [query] suite_id)")?;

        let sort: SortMode = self.sort.parse().context("invalid --sort")?;

        let mut query = Query::new(suite)
            .select(&self.dimension, self.metrics.iter().map(Metric::new))
            .context("invalid selection")?
            .with_segments(&self.segments)
            .context("invalid --segment")?
            .sort(sort)
            .at_page(self.page);

        if let Some(range) = &self.range {
            let range = DateRange::parse(range).context("invalid --range")?;
            query = query.with_range(range);
        }

        if let Some(limit) = self.limit.or(defaults.limit.map(i64::from)) {
            query = query.limit(limit).context("invalid --limit")?;
        }

        if let Some(search) = self.search_filter()? {
            query = query.filter(None, Some(search));
        }

        Ok(query)
    }

    fn search_filter(&self) -> Result<Option<DimensionFilter>> {
        let mut clauses = self
            .searches
            .iter()
            .map(|s| s.parse::<Clause>())
            .collect::<Result<Vec<_>, _>>()
            .context("invalid --search")?;

        let criterion: Criterion = match clauses.len() {
            0 => return Ok(None),
            1 => clauses.remove(0).into(),
            _ if self.any => Conjunction::or(clauses).into(),
            _ => Conjunction::and(clauses).into(),
        };

        Ok(Some(DimensionFilter::search([criterion])))
    }
}

/// Run the compile command
pub fn run(args: QueryArgs, config: &Config) -> Result<()> {
    let query = args.build_query(&config.query)?;
    let request = query.compile().context("failed to compile query")?;
    print_json(&request)
}
