//! JSON rendering of query documents.
//!
//! Key order follows the document layout (`query`, `from`, `size`,
//! `aggregations`, `sort`) and aggregation names keep the order they were
//! declared in, so output is deterministic.
//!
//! # Examples
//!
//! ```
//! use sql2es::dsl::{FilterClause, QueryDocument};
//! use sql2es::output::{to_json, to_json_pretty};
//!
//! let doc = QueryDocument {
//!     query: FilterClause::MatchAll,
//!     from: 0,
//!     size: 1,
//!     aggregations: None,
//!     sort: Vec::new(),
//! };
//!
//! assert_eq!(
//!     to_json(&doc).unwrap(),
//!     r#"{"query":{"match_all":{}},"from":0,"size":1}"#
//! );
//! assert!(to_json_pretty(&doc).unwrap().contains('\n'));
//! ```

use crate::dsl::QueryDocument;

/// Compact JSON, no whitespace.
pub fn to_json(document: &QueryDocument) -> serde_json::Result<String> {
    serde_json::to_string(document)
}

/// JSON indented by two spaces, one property per line.
pub fn to_json_pretty(document: &QueryDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

/// The document as a `serde_json::Value`, for inspection or merging.
pub fn to_value(document: &QueryDocument) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(document)
}
