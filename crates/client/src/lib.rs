//! rsuite Client
//!
//! Async client for the analytics reporting API.
//!
//! # Overview
//!
//! - [`Account`]: lists report suites and hands out [`ReportSuite`] and
//!   [`Reports`] handles
//! - [`ReportSuite`]: lazily cached metric, dimension and segment listings
//! - [`Reports`]: runs a compiled [`rsuite_query::Query`], one page per call
//! - [`Transport`]: the network seam; [`HttpTransport`] talks HTTP
//!
//! # Example
//!
//! ```no_run
//! use rsuite_client::Account;
//! use rsuite_config::ApiConfig;
//! use rsuite_query::{Metric, Query};
//!
//! # async fn run(config: ApiConfig) -> rsuite_client::Result<()> {
//! let account = Account::connect(&config)?;
//! for suite in account.list_report_suites().await? {
//!     println!("{} {:?}", suite.rsid(), suite.name());
//! }
//!
//! let query = Query::new("examplersid")
//!     .select("variables/page", [Metric::new("metrics/pageviews")])?;
//! let page = account.reports().run(&query).await?;
//! println!("{} rows", page.rows.len());
//! # Ok(())
//! # }
//! ```

mod account;
mod error;
mod record;
mod report;
mod suite;
mod transport;

pub use account::Account;
pub use error::{ClientError, Result};
pub use record::Record;
pub use report::{ReportPage, ReportRow, Reports};
pub use suite::{ReportSuite, SuiteMetadata};
pub use transport::{HttpTransport, Method, Request, Transport};
