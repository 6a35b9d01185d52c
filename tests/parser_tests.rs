// tests/parser_tests.rs

use sql2es::ast::{
    CompareOp, Expr, FromClause, FunctionArg, OrderByItem, Select, SelectExpr, Statement,
};
use sql2es::{parse, ParseError, SqlDialect};

fn parse_select(sql: &str) -> Select {
    match parse(sql, SqlDialect::Generic).unwrap() {
        Statement::Select(select) => *select,
        other => panic!("Expected SELECT, got {:?}", other),
    }
}

// ============================================================================
// WHERE clause lowering
// ============================================================================

#[test]
fn test_comparison() {
    let select = parse_select("SELECT id FROM users WHERE age > 18");

    assert_eq!(
        select.selection,
        Some(Expr::compare("age", CompareOp::GreaterThan, "18"))
    );
}

#[test]
fn test_string_literal_keeps_quotes() {
    let select = parse_select("SELECT id FROM users WHERE status = 'active'");

    match select.selection {
        Some(Expr::Comparison { op, field, value }) => {
            assert_eq!(op, CompareOp::Equal);
            assert_eq!(field, "status");
            assert_eq!(value.as_str(), "'active'");
            assert_eq!(value.value(), "active");
        }
        other => panic!("Expected comparison, got {:?}", other),
    }
}

#[test]
fn test_and_chain_is_left_deep() {
    let select = parse_select("SELECT id FROM t WHERE a = 1 AND b = 2 AND c = 3");

    // Should be: And(And(a, b), c)
    match select.selection {
        Some(Expr::And(left, right)) => {
            assert!(matches!(*left, Expr::And(..)));
            assert!(matches!(*right, Expr::Comparison { ref field, .. } if field == "c"));
        }
        other => panic!("Expected AND, got {:?}", other),
    }
}

#[test]
fn test_and_binds_tighter_than_or() {
    let select = parse_select("SELECT id FROM t WHERE a = 1 OR b = 2 AND c = 3");

    match select.selection {
        Some(Expr::Or(left, right)) => {
            assert!(matches!(*left, Expr::Comparison { .. }));
            assert!(matches!(*right, Expr::And(..)));
        }
        other => panic!("Expected OR, got {:?}", other),
    }
}

#[test]
fn test_parentheses_are_kept() {
    let select = parse_select("SELECT id FROM t WHERE (a = 1 AND b = 2) OR c = 3");

    match select.selection {
        Some(Expr::Or(left, _)) => match *left {
            Expr::Nested(inner) => assert!(matches!(*inner, Expr::And(..))),
            other => panic!("Expected parenthesized expression, got {:?}", other),
        },
        other => panic!("Expected OR, got {:?}", other),
    }
}

#[test]
fn test_all_comparison_operators() {
    let cases = [
        ("=", CompareOp::Equal),
        ("<>", CompareOp::NotEqual),
        ("!=", CompareOp::NotEqual),
        (">", CompareOp::GreaterThan),
        (">=", CompareOp::GreaterEqual),
        ("<", CompareOp::LessThan),
        ("<=", CompareOp::LessEqual),
    ];

    for (symbol, expected) in cases {
        let select = parse_select(&format!("SELECT id FROM t WHERE x {} 5", symbol));
        assert!(
            matches!(select.selection, Some(Expr::Comparison { op, .. }) if op == expected),
            "operator {}",
            symbol
        );
    }
}

#[test]
fn test_qualified_field_in_where() {
    let select = parse_select("SELECT id FROM users WHERE users.age >= 21");

    assert_eq!(
        select.selection,
        Some(Expr::compare("users.age", CompareOp::GreaterEqual, "21"))
    );
}

#[test]
fn test_untranslatable_predicates_are_opaque() {
    for sql in [
        "SELECT id FROM t WHERE name LIKE 'a%'",
        "SELECT id FROM t WHERE id IN (1, 2, 3)",
        "SELECT id FROM t WHERE deleted_at IS NULL",
    ] {
        let select = parse_select(sql);
        assert!(
            matches!(select.selection, Some(Expr::Unsupported(_))),
            "{}",
            sql
        );
    }
}

#[test]
fn test_subquery_in_where() {
    let select = parse_select("SELECT id FROM t WHERE id IN (SELECT user_id FROM orders)");

    assert!(matches!(select.selection, Some(Expr::Subquery(_))));
}

#[test]
fn test_subquery_operand_of_comparison() {
    let select = parse_select("SELECT id FROM t WHERE a = 1 AND total > (SELECT AVG(total) FROM t)");

    let selection = select.selection.unwrap();
    assert!(selection.find_subquery().is_some());
}

#[test]
fn test_subquery_outside_where_is_recorded() {
    let select = parse_select("SELECT id, (SELECT MAX(total) FROM orders) FROM users");
    assert_eq!(select.subquery.as_deref(), Some("(SELECT MAX(total) FROM orders)"));

    let select = parse_select("SELECT id FROM users ORDER BY (SELECT 1) DESC");
    assert!(select.subquery.is_some());

    let select = parse_select("SELECT COUNT(DISTINCT (SELECT 1)) FROM users");
    assert!(select.subquery.is_some());
}

#[test]
fn test_plain_select_records_no_subquery() {
    for sql in [
        "SELECT id, UPPER(name) FROM users WHERE age > 18 ORDER BY id",
        "SELECT * FROM (SELECT id FROM users) AS u",
    ] {
        assert_eq!(parse_select(sql).subquery, None, "{}", sql);
    }
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn test_projection_columns_and_wildcard() {
    let select = parse_select("SELECT *, id, users.name FROM users");

    assert_eq!(select.projection.len(), 3);
    assert_eq!(select.projection[0].expr, SelectExpr::Wildcard);
    assert_eq!(select.projection[1].expr, SelectExpr::Column("id".into()));
    assert_eq!(select.projection[2].expr, SelectExpr::Column("users.name".into()));
}

#[test]
fn test_aggregate_call_with_alias() {
    let select = parse_select("SELECT COUNT(*) AS employee_count FROM users");

    let item = &select.projection[0];
    assert_eq!(item.alias.as_deref(), Some("employee_count"));
    assert_eq!(item.text, "COUNT(*)");
    match &item.expr {
        SelectExpr::Function(call) => {
            assert_eq!(call.name, "COUNT");
            assert!(!call.distinct);
            assert_eq!(call.args, vec![FunctionArg::Wildcard]);
        }
        other => panic!("Expected function, got {:?}", other),
    }
}

#[test]
fn test_function_arguments() {
    let select = parse_select(
        "SELECT COUNT(DISTINCT u.email), SUM(salary), COUNT(1), MAX(price * 2) FROM u",
    );

    let calls: Vec<_> = select
        .projection
        .iter()
        .map(|item| match &item.expr {
            SelectExpr::Function(call) => call.clone(),
            other => panic!("Expected function, got {:?}", other),
        })
        .collect();

    assert!(calls[0].distinct);
    assert_eq!(calls[0].args, vec![FunctionArg::Column("u.email".into())]);
    assert_eq!(calls[1].args, vec![FunctionArg::Column("salary".into())]);
    assert_eq!(calls[2].args, vec![FunctionArg::Literal("1".into())]);
    assert_eq!(calls[3].args, vec![FunctionArg::Other("price * 2".into())]);
}

#[test]
fn test_window_function_is_not_a_call() {
    let select = parse_select("SELECT COUNT(*) OVER () FROM users");

    assert!(matches!(select.projection[0].expr, SelectExpr::Other(_)));
}

// ============================================================================
// FROM, GROUP BY, ORDER BY, LIMIT
// ============================================================================

#[test]
fn test_from_clause_kinds() {
    assert_eq!(
        parse_select("SELECT * FROM shop.users").from,
        FromClause::Table("users".into())
    );
    assert!(matches!(
        parse_select("SELECT * FROM a JOIN b ON a.id = b.id").from,
        FromClause::Joined(_)
    ));
    assert!(matches!(
        parse_select("SELECT * FROM a, b").from,
        FromClause::Joined(_)
    ));
    assert!(matches!(
        parse_select("SELECT * FROM (SELECT id FROM users) AS u").from,
        FromClause::Derived(_)
    ));
    assert_eq!(parse_select("SELECT 1").from, FromClause::Missing);
}

#[test]
fn test_group_by_fields_in_order() {
    let select = parse_select("SELECT COUNT(*) FROM users GROUP BY department, users.status");

    assert_eq!(select.group_by, vec!["department", "users.status"]);
}

#[test]
fn test_order_by_directions() {
    let select = parse_select("SELECT * FROM users ORDER BY name ASC, age DESC, id");

    assert_eq!(
        select.order_by,
        vec![
            OrderByItem { field: "name".into(), ascending: true },
            OrderByItem { field: "age".into(), ascending: false },
            OrderByItem { field: "id".into(), ascending: true },
        ]
    );
}

#[test]
fn test_limit_and_offset() {
    let select = parse_select("SELECT * FROM users LIMIT 10 OFFSET 5");

    assert_eq!(select.limit, Some(10));
    assert_eq!(select.offset, Some(5));
}

#[test]
fn test_non_literal_limit_is_rejected() {
    let err = parse("SELECT * FROM users LIMIT 1 + 1", SqlDialect::Generic).unwrap_err();

    assert!(matches!(err, ParseError::InvalidLimit(_)));
}

// ============================================================================
// Statement kinds and errors
// ============================================================================

#[test]
fn test_data_modifying_statements() {
    assert_eq!(
        parse("UPDATE users SET name = 'John' WHERE id = 1", SqlDialect::Generic).unwrap(),
        Statement::Update { table: "users".into() }
    );
    assert_eq!(
        parse("INSERT INTO users (id) VALUES (1)", SqlDialect::Generic).unwrap(),
        Statement::Insert { table: "users".into() }
    );
    assert_eq!(
        parse("DELETE FROM users WHERE id = 1", SqlDialect::Generic).unwrap(),
        Statement::Delete { table: "users".into() }
    );
}

#[test]
fn test_compound_queries() {
    for sql in [
        "SELECT id FROM a UNION SELECT id FROM b",
        "WITH x AS (SELECT id FROM a) SELECT id FROM x",
    ] {
        let statement = parse(sql, SqlDialect::Generic).unwrap();
        assert!(matches!(statement, Statement::Compound(_)), "{}", sql);
    }
}

#[test]
fn test_other_statements() {
    let statement = parse("CREATE TABLE t (id INT)", SqlDialect::Generic).unwrap();

    assert!(matches!(statement, Statement::Other(_)));
}

#[test]
fn test_syntax_error_is_wrapped() {
    let err = parse("SELEC id FROM users", SqlDialect::Generic).unwrap_err();

    assert!(matches!(err, ParseError::Syntax(_)));
    assert!(err.to_string().starts_with("Failed to parse SQL: "));
}

#[test]
fn test_exactly_one_statement() {
    let err = parse("SELECT 1 FROM a; SELECT 2 FROM b", SqlDialect::Generic).unwrap_err();

    assert_eq!(err, ParseError::StatementCount(2));
}

#[test]
fn test_mysql_dialect_backticks() {
    let statement = parse("SELECT `name` FROM `users` WHERE `age` > 3", SqlDialect::MySql).unwrap();

    match statement {
        Statement::Select(select) => {
            assert_eq!(select.from, FromClause::Table("users".into()));
            assert_eq!(
                select.selection,
                Some(Expr::compare("age", CompareOp::GreaterThan, "3"))
            );
        }
        other => panic!("Expected SELECT, got {:?}", other),
    }
}
