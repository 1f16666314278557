//! Report query builder
//!
//! Accumulates the dimension, metrics, date range, filters, sorting and paging
//! of a report and compiles them into a [`ReportRequest`].
//!
//! Configuration methods consume and return the builder so calls chain;
//! the ones that validate their input return `Result<Self>`. Compiling only
//! reads the builder, so it can be repeated, and [`Query::next_page`] advances
//! the page seen by the next compile.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::daterange::DateRange;
use crate::error::{QueryError, Result};
use crate::filter::DimensionFilter;
use crate::metric::{Metric, MetricFilter, MetricFilterKind};
use crate::wire::{
    CompiledMetricFilter, GlobalFilter, MetricContainer, MetricEntry, ReportRequest, Settings,
};

/// Sort direction of dimension items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Asc,
    Desc,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(QueryError::invalid_argument(format!(
                "unknown sort mode: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report query against one report suite
#[derive(Debug, Clone)]
pub struct Query {
    suite_id: String,
    dimension_id: Option<String>,
    metrics: Vec<Metric>,
    range: Option<DateRange>,
    segments: Vec<String>,
    metric_filters: Vec<MetricFilter>,
    dimension_filter: Option<DimensionFilter>,
    sort: SortMode,
    limit: Option<u64>,
    page: u32,
}

impl Query {
    /// Start a query for a report suite
    pub fn new(suite_id: impl Into<String>) -> Self {
        Self {
            suite_id: suite_id.into(),
            dimension_id: None,
            metrics: Vec::new(),
            range: None,
            segments: Vec::new(),
            metric_filters: Vec::new(),
            dimension_filter: None,
            sort: SortMode::default(),
            limit: None,
            page: 0,
        }
    }

    /// Choose the report dimension and its metrics
    pub fn select(
        mut self,
        dimension_id: impl Into<String>,
        metrics: impl IntoIterator<Item = Metric>,
    ) -> Result<Self> {
        let dimension_id = dimension_id.into();
        let metrics: Vec<Metric> = metrics.into_iter().collect();

        if dimension_id.is_empty() {
            return Err(QueryError::invalid_argument(
                "dimension id must not be empty",
            ));
        }
        if metrics.is_empty() {
            return Err(QueryError::invalid_argument(
                "at least one metric must be selected",
            ));
        }

        self.dimension_id = Some(dimension_id);
        self.metrics = metrics;
        Ok(self)
    }

    /// Report on `start..=end`
    pub fn for_range(self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        Ok(self.with_range(DateRange::new(start, end)?))
    }

    /// Report on an already validated range
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Restrict the whole report to segments, applied in order
    pub fn with_segments<I, S>(mut self, segment_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for segment_id in segment_ids {
            let segment_id = segment_id.into();
            if segment_id.is_empty() {
                return Err(QueryError::invalid_argument(
                    "segment id must not be empty",
                ));
            }
            self.segments.push(segment_id);
        }
        Ok(self)
    }

    /// Set metric filters and the dimension filter
    ///
    /// Replaces whatever a previous call configured.
    pub fn filter(
        mut self,
        metrics_filter: Option<Vec<MetricFilter>>,
        dimension_filter: Option<DimensionFilter>,
    ) -> Self {
        self.metric_filters = metrics_filter.unwrap_or_default();
        self.dimension_filter = dimension_filter;
        self
    }

    /// Set the dimension sort direction (ascending unless called)
    pub fn sort(mut self, mode: SortMode) -> Self {
        self.sort = mode;
        self
    }

    /// Limit the number of rows per page
    pub fn limit(mut self, size: i64) -> Result<Self> {
        let size = u64::try_from(size).map_err(|_| QueryError::InvalidLimit(size))?;
        self.limit = Some(size);
        Ok(self)
    }

    /// Start from a given page
    pub fn at_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Advance to the next page, returning the new page number
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the page number is already `u32::MAX`;
    /// the current page is left unchanged.
    pub fn next_page(&mut self) -> Result<u32> {
        self.page = self
            .page
            .checked_add(1)
            .ok_or_else(|| QueryError::invalid_argument("page number overflow"))?;
        Ok(self.page)
    }

    /// Current page (zero based)
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn suite_id(&self) -> &str {
        &self.suite_id
    }

    pub fn dimension_id(&self) -> Option<&str> {
        self.dimension_id.as_deref()
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn range(&self) -> Option<&DateRange> {
        self.range.as_ref()
    }

    /// One breakdown filter per `(dimension, item ids)` pair, in input order
    pub fn breakdown_filters<I, D, V, S>(breakdowns: I) -> Result<Vec<MetricFilter>>
    where
        I: IntoIterator<Item = (D, V)>,
        D: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        breakdowns
            .into_iter()
            .map(|(dimension, item_ids)| MetricFilter::breakdown(dimension, item_ids))
            .collect()
    }

    /// Compile the current state into a report request
    pub fn compile(&self) -> Result<ReportRequest> {
        let dimension = self
            .dimension_id
            .clone()
            .ok_or(QueryError::MissingField("dimension"))?;

        if self.metrics.is_empty() {
            return Err(QueryError::MissingField("metrics"));
        }

        let search = match &self.dimension_filter {
            Some(filter) => Some(filter.compile()?),
            None => None,
        };

        let request = ReportRequest {
            rsid: self.suite_id.clone(),
            global_filters: self.compose_global_filters(),
            metric_container: self.compose_metric_container(),
            metric_filters: self.compose_metric_filters()?,
            dimension,
            settings: self.compose_settings(),
            search,
        };

        tracing::trace!(
            rsid = %request.rsid,
            page = self.page,
            metrics = request.metric_container.metrics.len(),
            "compiled report query"
        );

        Ok(request)
    }

    fn compose_global_filters(&self) -> Vec<GlobalFilter> {
        let date_range = self.range.iter().map(|range| GlobalFilter::DateRange {
            date_range: range.to_interval(),
        });
        let segments = self.segments.iter().map(|id| GlobalFilter::Segment {
            segment_id: id.clone(),
        });

        date_range.chain(segments).collect()
    }

    fn compose_metric_container(&self) -> MetricContainer {
        let metrics = self
            .metrics
            .iter()
            .enumerate()
            .map(|(index, metric)| MetricEntry {
                column_id: metric
                    .column_id()
                    .map(str::to_string)
                    .unwrap_or_else(|| index.to_string()),
                id: metric.id().to_string(),
                filters: metric.filters().iter().map(|f| f.id().to_string()).collect(),
            })
            .collect();

        MetricContainer { metrics }
    }

    /// Explicit filters first, then filters attached to metrics; each id once
    fn compose_metric_filters(&self) -> Result<Vec<CompiledMetricFilter>> {
        let attached = self.metrics.iter().flat_map(|metric| metric.filters());

        let mut seen: HashMap<&str, &MetricFilterKind> = HashMap::new();
        let mut compiled = Vec::new();

        for filter in self.metric_filters.iter().chain(attached) {
            match seen.get(filter.id()) {
                Some(kind) if *kind == filter.kind() => continue,
                Some(_) => return Err(QueryError::DuplicateFilterId(filter.id().to_string())),
                None => {
                    seen.insert(filter.id(), filter.kind());
                    compiled.push(CompiledMetricFilter {
                        id: filter.id().to_string(),
                        kind: filter.kind().clone(),
                    });
                }
            }
        }

        Ok(compiled)
    }

    fn compose_settings(&self) -> Settings {
        Settings {
            page: self.page.to_string(),
            dimension_sort: self.sort,
            limit: self.limit.map(|limit| limit.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_without_metrics() {
        let query = Query {
            dimension_id: Some("variables/page".into()),
            ..Query::new("examplersid")
        };

        assert_eq!(
            query.compile().unwrap_err(),
            QueryError::MissingField("metrics")
        );
    }
}
