use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::dsl::Entry;

/// Field every document carries. Counting its values approximates a row count.
pub const COUNT_ALL_FIELD: &str = "_index";

/// Named aggregations, in insertion order.
pub type Aggregations = IndexMap<String, Aggregation>;

/// Metric aggregation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Value count, serialized as `value_count`
    Count,
    /// Distinct-value count, serialized as `cardinality`
    DistinctCount,
    Sum,
    Avg,
    Min,
    Max,
}

impl MetricKind {
    /// Recognizes the five SQL aggregate function names, case-insensitively.
    /// `DISTINCT` only changes the meaning of `COUNT`. Whether a plain `COUNT`
    /// ends up as a value count depends on its operand, see
    /// [`AggregationBuilder`](crate::aggregation::AggregationBuilder).
    pub fn from_function(name: &str, distinct: bool) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "count" if distinct => Some(MetricKind::DistinctCount),
            "count" => Some(MetricKind::Count),
            "sum" => Some(MetricKind::Sum),
            "avg" => Some(MetricKind::Avg),
            "min" => Some(MetricKind::Min),
            "max" => Some(MetricKind::Max),
            _ => None,
        }
    }

    /// Key of the metric in the query document.
    pub fn dsl_name(self) -> &'static str {
        match self {
            MetricKind::Count => "value_count",
            MetricKind::DistinctCount => "cardinality",
            MetricKind::Sum => "sum",
            MetricKind::Avg => "avg",
            MetricKind::Min => "min",
            MetricKind::Max => "max",
        }
    }
}

/// A node of the aggregation tree.
///
/// ```text
/// Metric   {"sum": {"field": "salary"}}
/// Terms    {"terms": {"field": "department"}, "aggregations": {...}}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    Metric {
        kind: MetricKind,
        field: String,
    },
    Terms {
        field: String,
        aggregations: Aggregations,
    },
}

impl Aggregation {
    pub fn metric(kind: MetricKind, field: impl Into<String>) -> Self {
        Aggregation::Metric {
            kind,
            field: field.into(),
        }
    }

    /// Count of documents, approximated on [`COUNT_ALL_FIELD`].
    pub fn count_all() -> Self {
        Aggregation::metric(MetricKind::Count, COUNT_ALL_FIELD)
    }

    /// Distinct values of [`COUNT_ALL_FIELD`].
    pub fn distinct_count_all() -> Self {
        Aggregation::metric(MetricKind::DistinctCount, COUNT_ALL_FIELD)
    }

    pub fn field(&self) -> &str {
        match self {
            Aggregation::Metric { field, .. } | Aggregation::Terms { field, .. } => field,
        }
    }

    /// Nested aggregations of a bucket; `None` for metrics.
    pub fn children(&self) -> Option<&Aggregations> {
        match self {
            Aggregation::Terms { aggregations, .. } => Some(aggregations),
            Aggregation::Metric { .. } => None,
        }
    }
}

impl Serialize for Aggregation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Aggregation::Metric { kind, field } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(kind.dsl_name(), &Entry("field", field))?;
                map.end()
            }
            Aggregation::Terms {
                field,
                aggregations,
            } => {
                let len = if aggregations.is_empty() { 1 } else { 2 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("terms", &Entry("field", field))?;
                if !aggregations.is_empty() {
                    map.serialize_entry("aggregations", aggregations)?;
                }
                map.end()
            }
        }
    }
}
