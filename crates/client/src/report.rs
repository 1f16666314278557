//! Running report queries
//!
//! One call returns one page; advance the query with
//! [`rsuite_query::Query::next_page`] and run it again for the next one.

use std::sync::Arc;

use rsuite_query::Query;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::transport::{Request, Transport};

/// One row of a ranked report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRow {
    pub item_id: String,
    /// Display value of the dimension item
    pub value: String,
    /// One number per metric column, in column order
    pub data: Vec<f64>,
}

/// One page of report results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportPage {
    pub total_pages: u32,
    pub total_elements: u64,
    /// Zero based page number
    pub number: u32,
    pub last_page: bool,
    pub column_ids: Vec<String>,
    pub rows: Vec<ReportRow>,
    /// Column totals over all pages
    pub totals: Vec<f64>,
}

impl ReportPage {
    /// Whether another page can be requested
    pub fn has_next(&self) -> bool {
        !self.last_page && self.number.saturating_add(1) < self.total_pages
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPage {
    total_pages: u32,
    total_elements: u64,
    number: u32,
    last_page: bool,
    columns: RawColumns,
    rows: Vec<ReportRow>,
    summary_data: RawSummary,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawColumns {
    column_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSummary {
    totals: Vec<f64>,
}

impl From<RawPage> for ReportPage {
    fn from(raw: RawPage) -> Self {
        Self {
            total_pages: raw.total_pages,
            total_elements: raw.total_elements,
            number: raw.number,
            last_page: raw.last_page,
            column_ids: raw.columns.column_ids,
            rows: raw.rows,
            totals: raw.summary_data.totals,
        }
    }
}

/// Executes compiled queries against `/reports`
#[derive(Clone)]
pub struct Reports {
    transport: Arc<dyn Transport>,
}

impl Reports {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Compile `query` and fetch its current page
    pub async fn run(&self, query: &Query) -> Result<ReportPage> {
        let payload = serde_json::to_value(query.compile()?)?;
        let body = self
            .transport
            .execute(&Request::post("/reports", payload))
            .await?;

        let page: ReportPage = serde_json::from_value::<RawPage>(body)?.into();
        debug!(
            rsid = %query.suite_id(),
            page = page.number,
            rows = page.rows.len(),
            total_pages = page.total_pages,
            "report page received"
        );
        Ok(page)
    }
}
