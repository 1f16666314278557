//! Report suites and their metadata
//!
//! Metric, dimension and segment listings are fetched on first use and cached
//! for the lifetime of the [`ReportSuite`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::record::Record;
use crate::transport::{Request, Transport};

/// Metadata of one report suite
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuiteMetadata {
    pub metrics: Vec<Record>,
    pub dimensions: Vec<Record>,
    pub segments: Vec<Record>,
}

/// Handle on a report suite
pub struct ReportSuite {
    rsid: String,
    name: Option<String>,
    transport: Arc<dyn Transport>,
    metrics: OnceCell<Vec<Record>>,
    dimensions: OnceCell<Vec<Record>>,
    segments: OnceCell<Vec<Record>>,
}

impl fmt::Debug for ReportSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportSuite")
            .field("rsid", &self.rsid)
            .field("name", &self.name)
            .finish()
    }
}

impl ReportSuite {
    pub fn new(
        transport: Arc<dyn Transport>,
        rsid: impl Into<String>,
        name: Option<String>,
    ) -> Self {
        Self {
            rsid: rsid.into(),
            name,
            transport,
            metrics: OnceCell::new(),
            dimensions: OnceCell::new(),
            segments: OnceCell::new(),
        }
    }

    pub fn rsid(&self) -> &str {
        &self.rsid
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Metrics available in this suite
    pub async fn metrics(&self) -> Result<&[Record]> {
        self.metrics
            .get_or_try_init(|| async {
                let body = self.fetch("metrics").await?;
                Record::from_array(body)
            })
            .await
            .map(Vec::as_slice)
    }

    /// Dimensions available in this suite
    pub async fn dimensions(&self) -> Result<&[Record]> {
        self.dimensions
            .get_or_try_init(|| async {
                let body = self.fetch("dimensions").await?;
                Record::from_array(body)
            })
            .await
            .map(Vec::as_slice)
    }

    /// Segments shared with this suite
    pub async fn segments(&self) -> Result<&[Record]> {
        self.segments
            .get_or_try_init(|| async {
                let body = self.fetch("segments").await?;
                Record::from_array(content(body)?)
            })
            .await
            .map(Vec::as_slice)
    }

    /// Fetch metrics, dimensions and segments concurrently
    ///
    /// Fails with the first error; listings that did succeed stay cached.
    pub async fn fill(&self) -> Result<SuiteMetadata> {
        let (metrics, dimensions, segments) =
            tokio::try_join!(self.metrics(), self.dimensions(), self.segments())?;

        Ok(SuiteMetadata {
            metrics: metrics.to_vec(),
            dimensions: dimensions.to_vec(),
            segments: segments.to_vec(),
        })
    }

    async fn fetch(&self, collection: &str) -> Result<Value> {
        debug!(rsid = %self.rsid, collection, "fetching suite metadata");
        let request = Request::get(format!("/{}?rsid={}", collection, self.rsid));
        self.transport.execute(&request).await
    }
}

/// The `content` array of a paged listing
pub(crate) fn content(body: Value) -> Result<Value> {
    match body {
        Value::Object(mut map) => map
            .remove("content")
            .ok_or_else(|| ClientError::unexpected("listing without a 'content' field")),
        _ => Err(ClientError::unexpected(
            "expected a listing object with a 'content' field",
        )),
    }
}
