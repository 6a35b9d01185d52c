use crate::ast::Select;

/// A top-level SQL statement.
///
/// Only [`Statement::Select`] can be compiled into a query document. The
/// data-modifying kinds are kept so callers get a precise error and can
/// still ask for the table they target.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A single `SELECT` without set operations or CTEs
    Select(Box<Select>),

    /// `UPDATE <table> SET ...`
    Update { table: String },

    /// `INSERT INTO <table> ...`
    Insert { table: String },

    /// `DELETE FROM <table> ...`
    Delete { table: String },

    /// `UNION`/`INTERSECT`/`EXCEPT` queries and queries with a `WITH` clause
    Compound(String),

    /// Any other statement (DDL, `SHOW`, transactions, ...)
    Other(String),
}

impl Statement {
    /// Short human-readable name of the statement kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Select(_) => "SELECT",
            Statement::Update { .. } => "UPDATE",
            Statement::Insert { .. } => "INSERT",
            Statement::Delete { .. } => "DELETE",
            Statement::Compound(_) => "compound SELECT",
            Statement::Other(_) => "unknown",
        }
    }
}
