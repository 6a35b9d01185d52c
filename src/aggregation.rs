//! Aggregation pipeline construction.
//!
//! A SELECT needs aggregation when it calls one of COUNT/SUM/AVG/MIN/MAX in
//! its projection or has a GROUP BY clause. The pipeline is then:
//!
//! ```text
//! GROUP BY a, b         group_by_a (terms a)
//!                         └─ group_by_b (terms b)
//!                              └─ <metrics from the projection>
//! ```
//!
//! Without GROUP BY the metrics sit at the root. A GROUP BY without any
//! metric gets a synthesized `count` so each bucket carries a value.
//!
//! Counting rows is approximated. `COUNT(*)` and `COUNT(1)` count values of
//! the `_index` field, while `COUNT(field)` and the synthesized `count`
//! count distinct values.

use tracing::{debug, warn};

use crate::ast::{FunctionArg, FunctionCall, Select, SelectExpr, SelectItem};
use crate::compiler::CompileError;
use crate::config::Strictness;
use crate::dsl::{Aggregation, Aggregations, MetricKind};
use crate::fields::bare_field;

/// Name of the metric added to GROUP BY queries that select none.
pub const DEFAULT_COUNT_NAME: &str = "count";

/// Prefix of bucket aggregation names.
pub const GROUP_BY_PREFIX: &str = "group_by_";

/// Metric kind of a select item, if it is a call to an aggregate function.
pub fn metric_kind(item: &SelectItem) -> Option<MetricKind> {
    match &item.expr {
        SelectExpr::Function(call) => MetricKind::from_function(&call.name, call.distinct),
        _ => None,
    }
}

/// True when the statement must be answered with aggregations.
pub fn needs_aggregation(select: &Select) -> bool {
    !select.group_by.is_empty() || select.projection.iter().any(|item| metric_kind(item).is_some())
}

/// Builds the aggregation tree of a SELECT.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationBuilder {
    strictness: Strictness,
}

impl AggregationBuilder {
    pub fn new(strictness: Strictness) -> Self {
        AggregationBuilder { strictness }
    }

    pub fn build(&self, select: &Select) -> Result<Aggregations, CompileError> {
        let mut metrics = self.extract_metrics(&select.projection)?;

        let group_fields: Vec<String> = select.group_by.iter().map(|f| bare_field(f)).collect();
        if group_fields.is_empty() {
            return Ok(metrics);
        }

        if metrics.is_empty() {
            debug!("GROUP BY without metrics, adding default count");
            metrics.insert(
                DEFAULT_COUNT_NAME.to_string(),
                Aggregation::distinct_count_all(),
            );
        }

        Ok(nest_buckets(&group_fields, metrics))
    }

    /// Metric aggregations named by alias, or by the lowercased select text.
    pub fn extract_metrics(&self, projection: &[SelectItem]) -> Result<Aggregations, CompileError> {
        let mut metrics = Aggregations::new();

        for item in projection {
            let SelectExpr::Function(call) = &item.expr else {
                continue;
            };

            let Some(kind) = MetricKind::from_function(&call.name, call.distinct) else {
                debug!(function = %call.name, "not an aggregate function, ignoring");
                continue;
            };

            let Some(metric) = build_metric(kind, call) else {
                if self.strictness.is_strict() {
                    return Err(CompileError::UnsupportedFunction(item.text.clone()));
                }
                warn!(item = %item.text, "aggregate without a usable field, ignoring");
                continue;
            };

            let name = item
                .alias
                .clone()
                .unwrap_or_else(|| item.text.to_lowercase());
            debug!(%name, field = metric.field(), "metric aggregation");
            metrics.insert(name, metric);
        }

        Ok(metrics)
    }
}

/// The metric an aggregate call computes.
///
/// `COUNT(*)`, `COUNT(1)` and `COUNT()` count values of
/// [`COUNT_ALL_FIELD`](crate::dsl::COUNT_ALL_FIELD); `COUNT(field)` counts
/// distinct values of the field. The operand must be a
/// column path or a quoted name; table qualifiers and quotes are removed.
fn build_metric(kind: MetricKind, call: &FunctionCall) -> Option<Aggregation> {
    let first = call.args.first();

    if kind == MetricKind::Count {
        match first {
            None | Some(FunctionArg::Wildcard) => return Some(Aggregation::count_all()),
            Some(FunctionArg::Literal(lit)) if lit == "1" => {
                return Some(Aggregation::count_all());
            }
            _ => {}
        }
    }

    let field = match first? {
        FunctionArg::Column(text) => bare_field(text),
        FunctionArg::Literal(text) if text.starts_with('\'') => bare_field(text),
        FunctionArg::Wildcard | FunctionArg::Literal(_) | FunctionArg::Other(_) => return None,
    };
    if field.is_empty() {
        return None;
    }

    let kind = match kind {
        MetricKind::Count => MetricKind::DistinctCount,
        other => other,
    };
    Some(Aggregation::metric(kind, field))
}

/// Wraps `metrics` in one terms bucket per field, first field outermost.
pub fn nest_buckets(fields: &[String], metrics: Aggregations) -> Aggregations {
    fields.iter().rev().fold(metrics, |inner, field| {
        let mut level = Aggregations::new();
        level.insert(
            format!("{GROUP_BY_PREFIX}{field}"),
            Aggregation::Terms {
                field: field.clone(),
                aggregations: inner,
            },
        );
        level
    })
}
