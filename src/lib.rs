pub mod aggregation;
pub mod ast;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod dsl;
pub mod fields;
pub mod output;
pub mod parser;
pub mod predicate;
pub mod translate;

pub use ast::{CompareOp, Expr, Select, SelectItem, Statement};
pub use compiler::{CompileError, Compiler};
pub use config::{Options, SqlDialect, Strictness};
pub use dsl::{Aggregation, FilterClause, QueryDocument};
pub use output::{to_json, to_json_pretty};
pub use parser::{parse, ParseError};
pub use predicate::PredicateCompiler;
pub use translate::{table_name, translate, translate_pretty, translate_to_json, Error};
