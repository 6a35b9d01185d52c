use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::dsl::Entry;

/// Bound operator of a `range` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl RangeOp {
    pub fn as_str(self) -> &'static str {
        match self {
            RangeOp::Gt => "gt",
            RangeOp::Gte => "gte",
            RangeOp::Lt => "lt",
            RangeOp::Lte => "lte",
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the compiled filter tree.
///
/// Serializes as:
///
/// ```text
/// MatchAll           {"match_all": {}}
/// Term               {"term": {"status": "active"}}
/// Range              {"range": {"age": {"gt": "18"}}}
/// Must               {"bool": {"must": [...]}}
/// Should             {"bool": {"should": [...], "minimum_should_match": 1}}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    MatchAll,
    Term {
        field: String,
        value: String,
    },
    Range {
        field: String,
        op: RangeOp,
        value: String,
    },
    /// `bool.must`
    Must(Vec<FilterClause>),
    /// `bool.should`
    Should {
        clauses: Vec<FilterClause>,
        minimum_should_match: u32,
    },
}

impl FilterClause {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        FilterClause::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn range(field: impl Into<String>, op: RangeOp, value: impl Into<String>) -> Self {
        FilterClause::Range {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// A `should` clause requiring at least one match.
    pub fn any_of(clauses: Vec<FilterClause>) -> Self {
        FilterClause::Should {
            clauses,
            minimum_should_match: 1,
        }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, FilterClause::MatchAll)
    }

    /// Number of `bool` wrappers on the path down the first `should` child,
    /// counting this node. Zero for anything that is not a `should` clause.
    pub fn should_depth(&self) -> usize {
        match self {
            FilterClause::Should { clauses, .. } => {
                1 + clauses.first().map_or(0, FilterClause::should_depth)
            }
            _ => 0,
        }
    }
}

struct Empty;

impl Serialize for Empty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_map(Some(0))?.end()
    }
}

struct ShouldBody<'a> {
    clauses: &'a [FilterClause],
    minimum_should_match: u32,
}

impl Serialize for ShouldBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("should", self.clauses)?;
        map.serialize_entry("minimum_should_match", &self.minimum_should_match)?;
        map.end()
    }
}

impl Serialize for FilterClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            FilterClause::MatchAll => map.serialize_entry("match_all", &Empty)?,
            FilterClause::Term { field, value } => {
                map.serialize_entry("term", &Entry(field, value))?
            }
            FilterClause::Range { field, op, value } => {
                map.serialize_entry("range", &Entry(field, &Entry(op.as_str(), value)))?
            }
            FilterClause::Must(clauses) => {
                map.serialize_entry("bool", &Entry("must", clauses))?
            }
            FilterClause::Should {
                clauses,
                minimum_should_match,
            } => map.serialize_entry(
                "bool",
                &ShouldBody {
                    clauses,
                    minimum_should_match: *minimum_should_match,
                },
            )?,
        }
        map.end()
    }
}
