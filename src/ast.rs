//! # SQL Abstract Syntax Tree
//!
//! This module defines the tree the compilers work on. It is a deliberately
//! small, closed view of a SQL statement: the [`parser`](crate::parser) lowers
//! `sqlparser`'s much larger AST into it, keeping only the shapes the query
//! document compiler understands and collapsing everything else into opaque
//! variants that carry their rendered source text.
//!
//! ## Architecture Overview
//!
//! - **[expressions]** - WHERE clause expression nodes (AND, OR, parentheses, comparisons)
//! - **[operators]** - Comparison operators
//! - **[statements]** - Top-level statement kinds (SELECT, UPDATE, INSERT, DELETE)
//! - **[query]** - The SELECT statement body: projection, FROM, GROUP BY, ORDER BY, LIMIT
//!
//! ## Example
//!
//! ```text
//! SELECT department, COUNT(*) AS n FROM users WHERE age > 18 GROUP BY department
//! ```
//!
//! lowers to a [`Statement::Select`] whose `selection` is
//! `Comparison { op: GreaterThan, field: "age", value: "18" }`, whose
//! projection holds a column item and a `COUNT` function item aliased `n`,
//! and whose `group_by` is `["department"]`.
pub mod expressions;
pub mod operators;
pub mod query;
pub mod statements;

pub use expressions::{Expr, Literal};
pub use operators::CompareOp;
pub use query::{FromClause, FunctionArg, FunctionCall, OrderByItem, Select, SelectExpr, SelectItem};
pub use statements::Statement;
