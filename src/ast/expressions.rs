use std::fmt;

use crate::ast::CompareOp;
use crate::fields;

/// A literal exactly as it appeared in the SQL source.
///
/// String literals keep their single quotes (`'active'`), numbers keep their
/// spelling (`18`, `2.50`). Unquoting is the predicate compiler's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal(pub String);

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Literal(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The literal's value: single-quoted strings lose their quotes.
    pub fn value(&self) -> String {
        fields::literal_value(&self.0)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node of a WHERE clause.
///
/// The set of variants is closed: everything the compiler cannot translate
/// is lowered to [`Expr::Unsupported`] or, for nested queries,
/// [`Expr::Subquery`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Logical AND
    ///
    /// # Example
    /// ```text
    /// age > 18 AND status = 'active'
    /// ```
    And(Box<Expr>, Box<Expr>),

    /// Logical OR
    ///
    /// # Example
    /// ```text
    /// status = 'vip' OR status = 'gold'
    /// ```
    Or(Box<Expr>, Box<Expr>),

    /// Parenthesized expression
    ///
    /// Only affects how the tree was built, never the translation.
    Nested(Box<Expr>),

    /// Field compared with a literal
    ///
    /// # Example
    /// ```text
    /// salary >= 5000
    /// ```
    Comparison {
        op: CompareOp,
        field: String,
        value: Literal,
    },

    /// A nested SELECT anywhere in the predicate (`IN (SELECT ...)`,
    /// `EXISTS (...)`, scalar subqueries).
    Subquery(String),

    /// Any other expression shape (`LIKE`, `IN (...)`, `IS NULL`, arithmetic,
    /// ...), kept as its rendered text.
    Unsupported(String),
}

impl Expr {
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    pub fn nested(inner: Expr) -> Self {
        Expr::Nested(Box::new(inner))
    }

    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<String>) -> Self {
        Expr::Comparison {
            op,
            field: field.into(),
            value: Literal::new(value),
        }
    }

    /// Returns the text of the first subquery found in this tree, if any.
    pub fn find_subquery(&self) -> Option<&str> {
        match self {
            Expr::Subquery(text) => Some(text),
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.find_subquery().or_else(|| right.find_subquery())
            }
            Expr::Nested(inner) => inner.find_subquery(),
            Expr::Comparison { .. } | Expr::Unsupported(_) => None,
        }
    }
}
