//! WHERE clause compilation.
//!
//! Turns an [`Expr`] tree into a [`FilterClause`] tree:
//!
//! | SQL                 | filter clause                                  |
//! |---------------------|------------------------------------------------|
//! | *(no WHERE)*        | `match_all`                                    |
//! | `f = v`             | `term`                                         |
//! | `f > v`, `>=`, `<`, `<=` | `range` with `gt`, `gte`, `lt`, `lte`     |
//! | `(e)`               | whatever `e` compiles to                       |
//! | `a AND b`           | `bool.must`, flattened along the left spine    |
//! | `a OR b`            | `bool.should` + `minimum_should_match: 1`      |
//!
//! Anything else falls back to `match_all`, or fails in strict mode.

use tracing::warn;

use crate::ast::{CompareOp, Expr, Literal};
use crate::compiler::CompileError;
use crate::config::Strictness;
use crate::dsl::{FilterClause, RangeOp};

/// Compiles boolean predicate trees into filter clauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredicateCompiler {
    strictness: Strictness,
}

impl PredicateCompiler {
    pub fn new(strictness: Strictness) -> Self {
        PredicateCompiler { strictness }
    }

    /// Compile an optional WHERE clause. `None` matches every document.
    pub fn compile(&self, expr: Option<&Expr>) -> Result<FilterClause, CompileError> {
        match expr {
            Some(expr) => self.compile_expr(expr),
            None => Ok(FilterClause::MatchAll),
        }
    }

    pub fn compile_expr(&self, expr: &Expr) -> Result<FilterClause, CompileError> {
        match expr {
            Expr::Nested(inner) => self.compile_expr(inner),

            Expr::And(left, right) => {
                let left = self.compile_expr(left)?;
                let right = self.compile_expr(right)?;
                Ok(match left {
                    // Sequential ANDs parse left-deep; keep them in one array.
                    FilterClause::Must(mut clauses) => {
                        clauses.push(right);
                        FilterClause::Must(clauses)
                    }
                    left => FilterClause::Must(vec![left, right]),
                })
            }

            Expr::Or(left, right) => {
                let left = self.compile_expr(left)?;
                let right = self.compile_expr(right)?;
                Ok(FilterClause::any_of(vec![left, right]))
            }

            Expr::Comparison { op, field, value } => self.compile_comparison(*op, field, value),

            Expr::Subquery(text) | Expr::Unsupported(text) => self.fallback(text),
        }
    }

    fn compile_comparison(
        &self,
        op: CompareOp,
        field: &str,
        value: &Literal,
    ) -> Result<FilterClause, CompileError> {
        let range_op = match op {
            CompareOp::Equal => return Ok(FilterClause::term(field, value.value())),
            CompareOp::GreaterThan => RangeOp::Gt,
            CompareOp::GreaterEqual => RangeOp::Gte,
            CompareOp::LessThan => RangeOp::Lt,
            CompareOp::LessEqual => RangeOp::Lte,
            CompareOp::NotEqual => {
                return self.fallback(&format!("{field} {op} {value}"));
            }
        };
        Ok(FilterClause::range(field, range_op, value.value()))
    }

    fn fallback(&self, text: &str) -> Result<FilterClause, CompileError> {
        if self.strictness.is_strict() {
            return Err(CompileError::UnsupportedPredicate(text.to_string()));
        }
        warn!(predicate = text, "no filter translation, falling back to match_all");
        Ok(FilterClause::MatchAll)
    }
}

/// Compile a WHERE clause with the default (permissive) settings.
pub fn compile_predicate(expr: Option<&Expr>) -> FilterClause {
    let compiler = PredicateCompiler::default();
    match compiler.compile(expr) {
        Ok(clause) => clause,
        // Permissive compilation never reports an error.
        Err(_) => FilterClause::MatchAll,
    }
}
