//! Company account: the entry point for suites and reports

use std::sync::Arc;

use rsuite_config::ApiConfig;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::report::Reports;
use crate::suite::{ReportSuite, content};
use crate::transport::{HttpTransport, Request, Transport};

/// Access to the report suites of one company
#[derive(Clone)]
pub struct Account {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account").finish_non_exhaustive()
    }
}

impl Account {
    /// Use an existing transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Connect over HTTP with the given credentials
    pub fn connect(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// List the company's report suites
    pub async fn list_report_suites(&self) -> Result<Vec<ReportSuite>> {
        let body = self
            .transport
            .execute(&Request::get("/collections/suites?expansion=name"))
            .await?;

        let items = match content(body)? {
            Value::Array(items) => items,
            _ => {
                return Err(ClientError::unexpected(
                    "suite listing 'content' is not an array",
                ));
            }
        };

        let suites = items
            .into_iter()
            .map(|item| {
                let rsid = item
                    .get("rsid")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ClientError::unexpected("report suite without an rsid"))?;
                let name = item.get("name").and_then(Value::as_str).map(str::to_string);
                Ok(ReportSuite::new(self.transport.clone(), rsid, name))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(count = suites.len(), "listed report suites");
        Ok(suites)
    }

    /// Handle on a suite known by id
    pub fn suite(&self, rsid: impl Into<String>) -> ReportSuite {
        ReportSuite::new(self.transport.clone(), rsid, None)
    }

    /// Report runner sharing this account's transport
    pub fn reports(&self) -> Reports {
        Reports::new(self.transport.clone())
    }
}
