use crate::ast::Expr;

/// The body of a `SELECT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Projected items, in source order
    pub projection: Vec<SelectItem>,

    /// Source relation
    pub from: FromClause,

    /// WHERE clause
    pub selection: Option<Expr>,

    /// GROUP BY field paths, in declaration order
    pub group_by: Vec<String>,

    /// ORDER BY items, in source order
    pub order_by: Vec<OrderByItem>,

    /// LIMIT row count
    pub limit: Option<u64>,

    /// OFFSET row count
    pub offset: Option<u64>,

    /// First nested query found in any clause other than FROM, rendered
    pub subquery: Option<String>,
}

impl Select {
    /// A `SELECT * FROM <table>` skeleton, mostly useful for building trees by hand.
    pub fn from_table(table: impl Into<String>) -> Self {
        Select {
            projection: vec![SelectItem::wildcard()],
            from: FromClause::Table(table.into()),
            selection: None,
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            subquery: None,
        }
    }
}

/// What a `FROM` clause names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FromClause {
    /// A plain table reference; only the last path segment is kept
    /// (`db.users` becomes `users`)
    Table(String),

    /// Several relations or explicit joins
    Joined(String),

    /// Derived tables, table functions, `UNNEST`, ...
    Derived(String),

    /// No FROM clause at all (`SELECT 1`)
    Missing,
}

/// One projected item.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: SelectExpr,

    /// `AS alias`, verbatim
    pub alias: Option<String>,

    /// The expression as rendered by the SQL parser, without the alias
    pub text: String,
}

impl SelectItem {
    pub fn wildcard() -> Self {
        SelectItem {
            expr: SelectExpr::Wildcard,
            alias: None,
            text: "*".to_string(),
        }
    }

    pub fn column(path: impl Into<String>) -> Self {
        let path = path.into();
        SelectItem {
            text: path.clone(),
            expr: SelectExpr::Column(path),
            alias: None,
        }
    }

    pub fn function(call: FunctionCall) -> Self {
        SelectItem {
            text: call.to_sql(),
            expr: SelectExpr::Function(call),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// The expression part of a [`SelectItem`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectExpr {
    /// `*` or `t.*`
    Wildcard,
    /// A column path such as `salary` or `users.salary`
    Column(String),
    /// A function call such as `COUNT(*)` or `upper(name)`
    Function(FunctionCall),
    /// Anything else (arithmetic, literals, CASE, ...)
    Other(String),
}

/// A function call in the projection, kept structurally.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Function name as written
    pub name: String,
    /// `DISTINCT` inside the parentheses
    pub distinct: bool,
    pub args: Vec<FunctionArg>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Vec<FunctionArg>) -> Self {
        FunctionCall {
            name: name.into(),
            distinct: false,
            args,
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Renders the call back to SQL.
    pub fn to_sql(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(FunctionArg::as_str).collect();
        let distinct = if self.distinct { "DISTINCT " } else { "" };
        format!("{}({}{})", self.name, distinct, args.join(", "))
    }
}

/// One argument of a [`FunctionCall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionArg {
    /// `*`
    Wildcard,
    /// A column path
    Column(String),
    /// A literal, quotes included
    Literal(String),
    /// Any other expression, rendered
    Other(String),
}

impl FunctionArg {
    pub fn as_str(&self) -> &str {
        match self {
            FunctionArg::Wildcard => "*",
            FunctionArg::Column(s) | FunctionArg::Literal(s) | FunctionArg::Other(s) => s,
        }
    }
}

/// One `ORDER BY` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByItem {
    pub field: String,
    pub ascending: bool,
}
