//! Search-engine query documents.
//!
//! These are the compiler's output types. Each implements `serde::Serialize`
//! with the exact key layout the search engine expects, so rendering is just
//! `serde_json::to_string` (see [`output`](crate::output)).

pub mod aggregation;
pub mod document;
pub mod filter;

pub use aggregation::{Aggregation, Aggregations, MetricKind, COUNT_ALL_FIELD};
pub use document::{QueryDocument, SortDirective, SortOrder};
pub use filter::{FilterClause, RangeOp};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single-entry JSON object: `{key: value}`.
pub(crate) struct Entry<'a, V: ?Sized>(pub &'a str, pub &'a V);

impl<V: Serialize + ?Sized> Serialize for Entry<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}
