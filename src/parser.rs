//! SQL front end.
//!
//! Parses SQL text with `sqlparser` and lowers the single resulting
//! statement into the crate's own [`ast`](crate::ast). Lowering never fails
//! on shapes the compiler cannot translate; those become opaque variants
//! carrying their rendered text so the compiler can decide what to do.

use std::ops::ControlFlow;

use sqlparser::ast::{
    self as sp, visit_expressions, BinaryOperator, DuplicateTreatment, Expr as SpExpr, FromTable,
    FunctionArg as SpFunctionArg, FunctionArgExpr, FunctionArguments, GroupByExpr, SetExpr,
    TableFactor, TableWithJoins, Visit,
};
use sqlparser::parser::Parser;
use thiserror::Error;
use tracing::debug;

use crate::ast::{
    CompareOp, Expr, FromClause, FunctionArg, FunctionCall, Literal, OrderByItem, Select,
    SelectExpr, SelectItem, Statement,
};
use crate::config::SqlDialect;

/// Errors raised while turning SQL text into a [`Statement`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text is not valid SQL for the selected dialect
    #[error("Failed to parse SQL: {0}")]
    Syntax(String),

    #[error("expected exactly one SQL statement, got {0}")]
    StatementCount(usize),

    #[error("LIMIT and OFFSET must be non-negative integer literals, got '{0}'")]
    InvalidLimit(String),

    #[error("unsupported SQL: {0}")]
    Unsupported(String),
}

/// Parse one SQL statement.
pub fn parse(sql: &str, dialect: SqlDialect) -> Result<Statement, ParseError> {
    let parser_dialect = dialect.parser_dialect();
    let statements = Parser::parse_sql(parser_dialect.as_ref(), sql)
        .map_err(|e| ParseError::Syntax(e.to_string()))?;

    match statements.as_slice() {
        [statement] => {
            let lowered = lower_statement(statement)?;
            debug!(kind = lowered.kind(), %dialect, "parsed statement");
            Ok(lowered)
        }
        _ => Err(ParseError::StatementCount(statements.len())),
    }
}

fn lower_statement(statement: &sp::Statement) -> Result<Statement, ParseError> {
    match statement {
        sp::Statement::Query(query) => lower_query(query),
        sp::Statement::Update { table, .. } => Ok(Statement::Update {
            table: relation_name(table),
        }),
        sp::Statement::Insert(insert) => Ok(Statement::Insert {
            table: object_name(&insert.table_name),
        }),
        sp::Statement::Delete(delete) => {
            let from = match &delete.from {
                FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => tables,
            };
            // Multi-table MySQL deletes name their targets before FROM.
            let table = match delete.tables.first() {
                Some(name) => object_name(name),
                None => from.first().map(relation_name).unwrap_or_default(),
            };
            Ok(Statement::Delete { table })
        }
        other => Ok(Statement::Other(other.to_string())),
    }
}

fn lower_query(query: &sp::Query) -> Result<Statement, ParseError> {
    if query.with.is_some() {
        return Ok(Statement::Compound(query.to_string()));
    }

    let select = match query.body.as_ref() {
        SetExpr::Select(select) => select,
        _ => return Ok(Statement::Compound(query.to_string())),
    };

    let order_by = query
        .order_by
        .as_ref()
        .map(|order_by| {
            order_by
                .exprs
                .iter()
                .map(|o| OrderByItem {
                    field: field_path(&o.expr),
                    ascending: o.asc.unwrap_or(true),
                })
                .collect()
        })
        .unwrap_or_default();

    let limit = query.limit.as_ref().map(row_count).transpose()?;
    let offset = query
        .offset
        .as_ref()
        .map(|offset| row_count(&offset.value))
        .transpose()?;

    Ok(Statement::Select(Box::new(Select {
        projection: select.projection.iter().map(lower_select_item).collect(),
        from: lower_from(&select.from),
        selection: select.selection.as_ref().map(lower_expr),
        group_by: lower_group_by(&select.group_by)?,
        order_by,
        limit,
        offset,
        subquery: find_subquery(select, query.order_by.as_ref()),
    })))
}

/// Rendered text of the first nested query in the projection, WHERE,
/// GROUP BY, HAVING or ORDER BY. Derived tables in FROM are not counted.
fn find_subquery(select: &sp::Select, order_by: Option<&sp::OrderBy>) -> Option<String> {
    select
        .projection
        .iter()
        .find_map(first_subquery)
        .or_else(|| select.selection.as_ref().and_then(first_subquery))
        .or_else(|| first_subquery(&select.group_by))
        .or_else(|| select.having.as_ref().and_then(first_subquery))
        .or_else(|| order_by.and_then(|o| o.exprs.iter().find_map(first_subquery)))
}

fn first_subquery<V: Visit>(node: &V) -> Option<String> {
    let found = visit_expressions(node, |expr| {
        if is_subquery(expr) {
            ControlFlow::Break(expr.to_string())
        } else {
            ControlFlow::Continue(())
        }
    });

    match found {
        ControlFlow::Break(text) => Some(text),
        ControlFlow::Continue(()) => None,
    }
}

fn lower_from(from: &[TableWithJoins]) -> FromClause {
    match from {
        [] => FromClause::Missing,
        [single] if single.joins.is_empty() => match &single.relation {
            TableFactor::Table {
                name, args: None, ..
            } => FromClause::Table(object_name(name)),
            other => FromClause::Derived(other.to_string()),
        },
        _ => FromClause::Joined(
            from.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}

fn lower_group_by(group_by: &GroupByExpr) -> Result<Vec<String>, ParseError> {
    match group_by {
        GroupByExpr::All(_) => Err(ParseError::Unsupported("GROUP BY ALL".into())),
        GroupByExpr::Expressions(exprs, _) => Ok(exprs.iter().map(field_path).collect()),
    }
}

/// Lower a WHERE expression.
fn lower_expr(expr: &SpExpr) -> Expr {
    match expr {
        SpExpr::BinaryOp { left, op, right } => match op {
            BinaryOperator::And => Expr::and(lower_expr(left), lower_expr(right)),
            BinaryOperator::Or => Expr::or(lower_expr(left), lower_expr(right)),
            _ => {
                if is_subquery(left) || is_subquery(right) {
                    return Expr::Subquery(expr.to_string());
                }
                match compare_op(op) {
                    Some(op) => Expr::Comparison {
                        op,
                        field: field_path(left),
                        value: Literal::new(right.to_string()),
                    },
                    None => Expr::Unsupported(expr.to_string()),
                }
            }
        },
        SpExpr::Nested(inner) => Expr::nested(lower_expr(inner)),
        SpExpr::Subquery(_) | SpExpr::InSubquery { .. } | SpExpr::Exists { .. } => {
            Expr::Subquery(expr.to_string())
        }
        other => Expr::Unsupported(other.to_string()),
    }
}

fn is_subquery(expr: &SpExpr) -> bool {
    match expr {
        SpExpr::Subquery(_) | SpExpr::InSubquery { .. } | SpExpr::Exists { .. } => true,
        SpExpr::Function(func) => matches!(func.args, FunctionArguments::Subquery(_)),
        SpExpr::Nested(inner) => is_subquery(inner),
        _ => false,
    }
}

fn compare_op(op: &BinaryOperator) -> Option<CompareOp> {
    match op {
        BinaryOperator::Eq => Some(CompareOp::Equal),
        BinaryOperator::NotEq => Some(CompareOp::NotEqual),
        BinaryOperator::Gt => Some(CompareOp::GreaterThan),
        BinaryOperator::GtEq => Some(CompareOp::GreaterEqual),
        BinaryOperator::Lt => Some(CompareOp::LessThan),
        BinaryOperator::LtEq => Some(CompareOp::LessEqual),
        _ => None,
    }
}

fn lower_select_item(item: &sp::SelectItem) -> SelectItem {
    match item {
        sp::SelectItem::UnnamedExpr(expr) => SelectItem {
            expr: lower_select_expr(expr),
            alias: None,
            text: expr.to_string(),
        },
        sp::SelectItem::ExprWithAlias { expr, alias } => SelectItem {
            expr: lower_select_expr(expr),
            alias: Some(alias.value.clone()),
            text: expr.to_string(),
        },
        sp::SelectItem::Wildcard(_) => SelectItem::wildcard(),
        sp::SelectItem::QualifiedWildcard(..) => SelectItem {
            expr: SelectExpr::Wildcard,
            alias: None,
            text: item.to_string(),
        },
    }
}

fn lower_select_expr(expr: &SpExpr) -> SelectExpr {
    match expr {
        SpExpr::Identifier(_) | SpExpr::CompoundIdentifier(_) => SelectExpr::Column(field_path(expr)),
        SpExpr::Function(func) => match lower_function(func) {
            Some(call) => SelectExpr::Function(call),
            None => SelectExpr::Other(expr.to_string()),
        },
        SpExpr::Nested(inner) => lower_select_expr(inner),
        other => SelectExpr::Other(other.to_string()),
    }
}

/// Window functions and calls with subquery arguments are not kept as calls.
fn lower_function(func: &sp::Function) -> Option<FunctionCall> {
    if func.over.is_some() {
        return None;
    }

    let (distinct, args) = match &func.args {
        FunctionArguments::None => (false, Vec::new()),
        FunctionArguments::Subquery(_) => return None,
        FunctionArguments::List(list) => (
            matches!(list.duplicate_treatment, Some(DuplicateTreatment::Distinct)),
            list.args.iter().map(lower_function_arg).collect(),
        ),
    };

    Some(FunctionCall {
        name: object_name(&func.name),
        distinct,
        args,
    })
}

fn lower_function_arg(arg: &SpFunctionArg) -> FunctionArg {
    let arg_expr = match arg {
        SpFunctionArg::Unnamed(arg_expr) => arg_expr,
        named => return FunctionArg::Other(named.to_string()),
    };

    match arg_expr {
        FunctionArgExpr::Wildcard | FunctionArgExpr::QualifiedWildcard(_) => FunctionArg::Wildcard,
        FunctionArgExpr::Expr(expr @ (SpExpr::Identifier(_) | SpExpr::CompoundIdentifier(_))) => {
            FunctionArg::Column(field_path(expr))
        }
        FunctionArgExpr::Expr(expr @ SpExpr::Value(_)) => FunctionArg::Literal(expr.to_string()),
        FunctionArgExpr::Expr(expr) => FunctionArg::Other(expr.to_string()),
    }
}

/// Column path of an expression: identifiers lose their quote style and
/// compound identifiers are joined with `.`.
fn field_path(expr: &SpExpr) -> String {
    match expr {
        SpExpr::Identifier(ident) => ident.value.clone(),
        SpExpr::CompoundIdentifier(parts) => parts
            .iter()
            .map(|ident| ident.value.as_str())
            .collect::<Vec<_>>()
            .join("."),
        SpExpr::Nested(inner) => field_path(inner),
        other => other.to_string(),
    }
}

fn row_count(expr: &SpExpr) -> Result<u64, ParseError> {
    match expr {
        SpExpr::Value(sp::Value::Number(n, _)) => n
            .parse::<u64>()
            .map_err(|_| ParseError::InvalidLimit(n.clone())),
        other => Err(ParseError::InvalidLimit(other.to_string())),
    }
}

fn relation_name(table: &TableWithJoins) -> String {
    match &table.relation {
        TableFactor::Table { name, .. } => object_name(name),
        other => other.to_string(),
    }
}

/// Last segment of a possibly qualified name (`db.users` -> `users`).
fn object_name(name: &sp::ObjectName) -> String {
    name.0
        .last()
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}
