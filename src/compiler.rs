//! Statement compilation.
//!
//! [`Compiler::compile`] turns one lowered [`Statement`] into a
//! [`QueryDocument`]. Statements are validated up front, so a failure never
//! leaves a half-built document behind.
//!
//! Pagination rules worth knowing as a caller:
//!
//! - Aggregation queries always get `size: 0`; LIMIT, OFFSET and ORDER BY are
//!   ignored for them.
//! - Other queries default to `from: 0, size: 1` when there is no LIMIT. The
//!   default returns one document, not all of them.
//! - OFFSET is only honored together with LIMIT.

use thiserror::Error;
use tracing::debug;

use crate::aggregation::{self, AggregationBuilder};
use crate::ast::{Expr, FromClause, Select, SelectExpr, Statement};
use crate::config::Strictness;
use crate::dsl::{MetricKind, QueryDocument, SortDirective, SortOrder};
use crate::predicate::PredicateCompiler;

/// Page size used when a non-aggregation query has no LIMIT.
pub const DEFAULT_SIZE: u64 = 1;

/// Errors raised while compiling a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Not a plain single-table SELECT (UPDATE, UNION, joins, subqueries, ...)
    #[error("unsupported statement: {0}")]
    UnsupportedStatementKind(String),

    /// FROM does not name a single table
    #[error("unsupported FROM clause: {0}")]
    UnsupportedFromClause(String),

    /// Strict mode only
    #[error("predicate has no filter translation: {0}")]
    UnsupportedPredicate(String),

    /// Strict mode only
    #[error("unsupported function in select list: {0}")]
    UnsupportedFunction(String),
}

/// Compiles statements into query documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    strictness: Strictness,
}

impl Compiler {
    pub fn new(strictness: Strictness) -> Self {
        Compiler { strictness }
    }

    pub fn compile(&self, statement: &Statement) -> Result<QueryDocument, CompileError> {
        let select = self.validate(statement)?;

        let query = PredicateCompiler::new(self.strictness).compile(select.selection.as_ref())?;

        if aggregation::needs_aggregation(select) {
            if !select.order_by.is_empty() || select.limit.is_some() {
                debug!("aggregation query, ignoring ORDER BY and LIMIT");
            }
            let aggregations = AggregationBuilder::new(self.strictness).build(select)?;
            return Ok(QueryDocument {
                query,
                from: 0,
                size: 0,
                aggregations: Some(aggregations),
                sort: Vec::new(),
            });
        }

        let (from, size) = match select.limit {
            Some(limit) => (select.offset.unwrap_or(0), limit),
            None => (0, DEFAULT_SIZE),
        };

        let sort = select
            .order_by
            .iter()
            .map(|item| SortDirective {
                field: item.field.clone(),
                order: if item.ascending {
                    SortOrder::Asc
                } else {
                    SortOrder::Desc
                },
            })
            .collect();

        debug!(from, size, "search query");
        Ok(QueryDocument {
            query,
            from,
            size,
            aggregations: None,
            sort,
        })
    }

    /// Checks everything that can fail before any output is produced.
    fn validate<'a>(&self, statement: &'a Statement) -> Result<&'a Select, CompileError> {
        let select = match statement {
            Statement::Select(select) => select.as_ref(),
            Statement::Update { .. } | Statement::Insert { .. } | Statement::Delete { .. } => {
                return Err(CompileError::UnsupportedStatementKind(format!(
                    "{} statements are not supported",
                    statement.kind()
                )));
            }
            Statement::Compound(text) => {
                return Err(CompileError::UnsupportedStatementKind(format!(
                    "only simple SELECT statements are supported: {text}"
                )));
            }
            Statement::Other(text) => {
                return Err(CompileError::UnsupportedStatementKind(text.clone()));
            }
        };

        match &select.from {
            FromClause::Table(_) => {}
            FromClause::Joined(text) => {
                return Err(CompileError::UnsupportedStatementKind(format!(
                    "joins are not supported: {text}"
                )));
            }
            FromClause::Derived(text) => {
                return Err(CompileError::UnsupportedFromClause(format!(
                    "only simple FROM clauses are supported: {text}"
                )));
            }
            FromClause::Missing => {
                return Err(CompileError::UnsupportedFromClause(
                    "a FROM clause naming a table is required".into(),
                ));
            }
        }

        let subquery = select
            .subquery
            .as_deref()
            .or_else(|| select.selection.as_ref().and_then(Expr::find_subquery));
        if let Some(subquery) = subquery {
            return Err(CompileError::UnsupportedStatementKind(format!(
                "subqueries are not supported: {subquery}"
            )));
        }

        if self.strictness.is_strict() {
            for item in &select.projection {
                if let SelectExpr::Function(call) = &item.expr {
                    if MetricKind::from_function(&call.name, call.distinct).is_none() {
                        return Err(CompileError::UnsupportedFunction(item.text.clone()));
                    }
                }
            }
        }

        Ok(select)
    }
}

/// Compile a statement with the default (permissive) settings.
pub fn compile(statement: &Statement) -> Result<QueryDocument, CompileError> {
    Compiler::default().compile(statement)
}

/// Table a statement reads from or writes to.
pub fn target_table(statement: &Statement) -> Result<&str, CompileError> {
    match statement {
        Statement::Select(select) => match &select.from {
            FromClause::Table(name) => Ok(name.as_str()),
            FromClause::Joined(text) => Err(CompileError::UnsupportedStatementKind(format!(
                "joins are not supported: {text}"
            ))),
            FromClause::Derived(text) => Err(CompileError::UnsupportedFromClause(format!(
                "only simple FROM clauses are supported: {text}"
            ))),
            FromClause::Missing => Err(CompileError::UnsupportedFromClause(
                "a FROM clause naming a table is required".into(),
            )),
        },
        Statement::Update { table } | Statement::Insert { table } | Statement::Delete { table } => {
            Ok(table.as_str())
        }
        Statement::Compound(text) | Statement::Other(text) => Err(
            CompileError::UnsupportedStatementKind(format!("cannot determine table of: {text}")),
        ),
    }
}
