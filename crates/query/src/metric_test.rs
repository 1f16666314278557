//! Tests for metrics and metric filters

use serde_json::json;

use crate::error::QueryError;
use crate::metric::{FilterType, Metric, MetricFilter, MetricFilterKind};
use crate::wire::CompiledMetricFilter;

fn compiled(filter: &MetricFilter) -> serde_json::Value {
    serde_json::to_value(CompiledMetricFilter {
        id: filter.id().to_string(),
        kind: filter.kind().clone(),
    })
    .unwrap()
}

#[test]
fn test_generated_id_is_16_hex_chars() {
    let filter = MetricFilter::segment("s300000022_5bb7c94e80f0073611afb35c");

    assert_eq!(filter.id().len(), 16);
    assert!(filter.id().chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_generated_ids_differ() {
    let a = MetricFilter::segment("s1");
    let b = MetricFilter::segment("s1");

    assert_ne!(a.id(), b.id());
}

#[test]
fn test_with_id_replaces_generated_id() {
    let filter = MetricFilter::date_range("2017-01-01T00:00:00/2017-01-31T23:59:59")
        .with_id("c314676362ee1e8c");

    assert_eq!(filter.id(), "c314676362ee1e8c");
    assert_eq!(filter.filter_type(), FilterType::DateRange);
}

#[test]
fn test_filter_type_wire_names() {
    assert_eq!(FilterType::DateRange.as_str(), "dateRange");
    assert_eq!(FilterType::Segment.as_str(), "segment");
    assert_eq!(FilterType::Breakdown.as_str(), "breakdown");
}

#[test]
fn test_date_range_filter_json() {
    let filter = MetricFilter::date_range("2017-01-01T00:00:00/2017-01-31T23:59:59").with_id("f1");

    assert_eq!(
        compiled(&filter),
        json!({
            "id": "f1",
            "type": "dateRange",
            "dateRange": "2017-01-01T00:00:00/2017-01-31T23:59:59"
        })
    );
}

#[test]
fn test_segment_filter_json() {
    let filter = MetricFilter::segment("s300000022_abc").with_id("f2");

    assert_eq!(
        compiled(&filter),
        json!({"id": "f2", "type": "segment", "segmentId": "s300000022_abc"})
    );
}

#[test]
fn test_breakdown_filter_json() {
    let filter = MetricFilter::breakdown("variables/mobiledevicetype", ["1728229488", "2163986270"])
        .unwrap()
        .with_id("f3");

    assert_eq!(filter.filter_type(), FilterType::Breakdown);
    assert_eq!(
        compiled(&filter),
        json!({
            "id": "f3",
            "type": "breakdown",
            "dimension": "variables/mobiledevicetype",
            "itemIds": ["1728229488", "2163986270"]
        })
    );
}

#[test]
fn test_breakdown_requires_dimension() {
    let result = MetricFilter::breakdown("", ["1"]);
    assert!(matches!(result, Err(QueryError::InvalidArgument(_))));
}

#[test]
fn test_breakdown_requires_items() {
    let result = MetricFilter::breakdown("variables/page", Vec::<String>::new());
    assert!(matches!(result, Err(QueryError::InvalidArgument(_))));
}

#[test]
fn test_kind_reports_filter_type() {
    let kind = MetricFilterKind::Segment {
        segment_id: "s1".into(),
    };
    assert_eq!(kind.filter_type(), FilterType::Segment);
    assert_eq!(MetricFilter::new(kind.clone()).kind(), &kind);
}

#[test]
fn test_metric_defaults() {
    let metric = Metric::new("metrics/pageviews");

    assert_eq!(metric.id(), "metrics/pageviews");
    assert_eq!(metric.column_id(), None);
    assert!(metric.filters().is_empty());
}

#[test]
fn test_metric_filters_keep_order() {
    let first = MetricFilter::segment("s1").with_id("a");
    let second = MetricFilter::segment("s2").with_id("b");
    let third = MetricFilter::segment("s3").with_id("c");

    let metric = Metric::new("metrics/visits")
        .with_column_id("visits")
        .with_filter(first)
        .with_filters([second, third]);

    let ids: Vec<&str> = metric.filters().iter().map(|f| f.id()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(metric.column_id(), Some("visits"));
}
