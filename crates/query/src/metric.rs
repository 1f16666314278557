//! Metrics and the filters they reference

use rand::Rng;
use serde::Serialize;

use crate::error::{QueryError, Result};

/// Metric filter type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    DateRange,
    Segment,
    Breakdown,
}

impl FilterType {
    /// Value of the `type` key on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateRange => "dateRange",
            Self::Segment => "segment",
            Self::Breakdown => "breakdown",
        }
    }
}

/// Filter payload, serialized with a `type` tag and a type-specific key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MetricFilterKind {
    /// ISO interval, e.g. `2017-01-01T00:00:00/2018-12-31T23:59:59.999000`
    DateRange {
        #[serde(rename = "dateRange")]
        date_range: String,
    },
    /// Segment id
    Segment {
        #[serde(rename = "segmentId")]
        segment_id: String,
    },
    /// Dimension items to break a metric down by
    Breakdown {
        dimension: String,
        #[serde(rename = "itemIds")]
        item_ids: Vec<String>,
    },
}

impl MetricFilterKind {
    pub fn filter_type(&self) -> FilterType {
        match self {
            Self::DateRange { .. } => FilterType::DateRange,
            Self::Segment { .. } => FilterType::Segment,
            Self::Breakdown { .. } => FilterType::Breakdown,
        }
    }
}

/// A named constraint that metrics reference by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFilter {
    id: String,
    kind: MetricFilterKind,
}

impl MetricFilter {
    /// Create a filter with a freshly generated id
    pub fn new(kind: MetricFilterKind) -> Self {
        Self {
            id: generate_filter_id(),
            kind,
        }
    }

    /// Date range filter
    pub fn date_range(interval: impl Into<String>) -> Self {
        Self::new(MetricFilterKind::DateRange {
            date_range: interval.into(),
        })
    }

    /// Segment filter
    pub fn segment(segment_id: impl Into<String>) -> Self {
        Self::new(MetricFilterKind::Segment {
            segment_id: segment_id.into(),
        })
    }

    /// Breakdown filter on specific items of a dimension
    pub fn breakdown<I, S>(dimension: impl Into<String>, item_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dimension = dimension.into();
        let item_ids: Vec<String> = item_ids.into_iter().map(Into::into).collect();

        if dimension.is_empty() {
            return Err(QueryError::invalid_argument(
                "breakdown dimension must not be empty",
            ));
        }
        if item_ids.is_empty() {
            return Err(QueryError::invalid_argument(format!(
                "breakdown on {} needs at least one item id",
                dimension
            )));
        }

        Ok(Self::new(MetricFilterKind::Breakdown {
            dimension,
            item_ids,
        }))
    }

    /// Replace the generated id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &MetricFilterKind {
        &self.kind
    }

    pub fn filter_type(&self) -> FilterType {
        self.kind.filter_type()
    }
}

/// 8 random bytes, hex encoded
fn generate_filter_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 8] = rng.random();
    hex::encode(bytes)
}

/// A metric selected for a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    id: String,
    column_id: Option<String>,
    filters: Vec<MetricFilter>,
}

impl Metric {
    /// Create a metric (e.g. `metrics/pageviews`)
    ///
    /// The column id is assigned from the metric's position unless set with
    /// [`Metric::with_column_id`].
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column_id: None,
            filters: Vec::new(),
        }
    }

    pub fn with_column_id(mut self, column_id: impl Into<String>) -> Self {
        self.column_id = Some(column_id.into());
        self
    }

    /// Attach a filter
    pub fn with_filter(mut self, filter: MetricFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Attach several filters, keeping their order
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = MetricFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn column_id(&self) -> Option<&str> {
        self.column_id.as_deref()
    }

    pub fn filters(&self) -> &[MetricFilter] {
        &self.filters
    }
}
