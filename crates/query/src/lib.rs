//! rsuite Query
//!
//! Builds report requests for the analytics reporting API.
//!
//! # Overview
//!
//! - **Clauses**: search predicates composed with AND/OR/NOT and groups
//! - **Dimension filters**: item allow/deny lists plus search clauses
//! - **Metrics**: metric selection and the filters metrics reference by id
//! - **Query builder**: compiles everything into the JSON body of `/reports`
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use rsuite_query::{Clause, Conjunction, DimensionFilter, Metric, Query, SortMode};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(23, 59, 59).unwrap();
//!
//! let search = DimensionFilter::search([Conjunction::or([
//!     Clause::contains("'red'"),
//!     Clause::contains("'green'"),
//! ])]);
//!
//! let mut query = Query::new("examplersid")
//!     .select("variables/page", [Metric::new("metrics/pageviews")])?
//!     .for_range(start, end)?
//!     .filter(None, Some(search))
//!     .sort(SortMode::Desc)
//!     .limit(50)?;
//!
//! let first = serde_json::to_value(query.compile()?).unwrap();
//! assert_eq!(first["settings"]["page"], "0");
//!
//! query.next_page()?;
//! let second = serde_json::to_value(query.compile()?).unwrap();
//! assert_eq!(second["settings"]["page"], "1");
//! # Ok::<(), rsuite_query::QueryError>(())
//! ```

pub mod builder;
pub mod clause;
pub mod daterange;
pub mod error;
pub mod filter;
pub mod metric;
pub mod wire;

#[cfg(test)]
mod daterange_test;
#[cfg(test)]
mod metric_test;

// Re-exports for convenience
pub use builder::{Query, SortMode};
pub use clause::{Clause, Conjunction, Connective, Criterion, Operator};
pub use daterange::DateRange;
pub use error::{QueryError, Result};
pub use filter::DimensionFilter;
pub use metric::{FilterType, Metric, MetricFilter, MetricFilterKind};
pub use wire::{
    CompiledMetricFilter, GlobalFilter, MetricContainer, MetricEntry, ReportRequest,
    SearchRequest, Settings,
};
