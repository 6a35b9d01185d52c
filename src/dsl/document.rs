use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::dsl::{Aggregations, Entry, FilterClause};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sort key, serialized as `{"<field>": "asc"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    pub field: String,
    pub order: SortOrder,
}

impl Serialize for SortDirective {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Entry(&self.field, self.order.as_str()).serialize(serializer)
    }
}

/// The complete search request body.
///
/// ```text
/// {"query": {...}, "from": 0, "size": 1, "aggregations": {...}, "sort": [...]}
/// ```
///
/// `aggregations` is omitted when `None`, `sort` when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDocument {
    pub query: FilterClause,
    pub from: u64,
    /// Zero whenever `aggregations` is present.
    pub size: u64,
    pub aggregations: Option<Aggregations>,
    pub sort: Vec<SortDirective>,
}

impl QueryDocument {
    pub fn is_aggregation(&self) -> bool {
        self.aggregations.is_some()
    }
}

impl Serialize for QueryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 3 + usize::from(self.aggregations.is_some()) + usize::from(!self.sort.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("query", &self.query)?;
        map.serialize_entry("from", &self.from)?;
        map.serialize_entry("size", &self.size)?;
        if let Some(aggregations) = &self.aggregations {
            map.serialize_entry("aggregations", aggregations)?;
        }
        if !self.sort.is_empty() {
            map.serialize_entry("sort", &self.sort)?;
        }
        map.end()
    }
}
