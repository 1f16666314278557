//! JSON request bodies accepted by the reporting API
//!
//! These types are the output of [`crate::Query::compile`]; serialize them
//! with `serde_json` to get the payload posted to `/reports`.

use serde::Serialize;

use crate::builder::SortMode;
use crate::metric::MetricFilterKind;

/// Body of a report request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub rsid: String,
    pub global_filters: Vec<GlobalFilter>,
    pub metric_container: MetricContainer,
    pub metric_filters: Vec<CompiledMetricFilter>,
    pub dimension: String,
    pub settings: Settings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchRequest>,
}

/// Filters applied to the whole report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GlobalFilter {
    DateRange {
        #[serde(rename = "dateRange")]
        date_range: String,
    },
    Segment {
        #[serde(rename = "segmentId")]
        segment_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricContainer {
    pub metrics: Vec<MetricEntry>,
}

/// One metric column of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEntry {
    pub column_id: String,
    pub id: String,
    /// Ids of entries in `metricFilters`
    pub filters: Vec<String>,
}

/// A metric filter rendered as `{id, type, <type key>: value}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledMetricFilter {
    pub id: String,
    #[serde(flatten)]
    pub kind: MetricFilterKind,
}

/// Paging, sorting and size of the returned rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub page: String,
    pub dimension_sort: SortMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

/// Dimension search: item allow/deny lists and clause text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub include_search_total: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_item_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,
}
