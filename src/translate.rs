//! One-call translation from SQL text.

use thiserror::Error;

use crate::compiler::{self, CompileError, Compiler};
use crate::config::Options;
use crate::dsl::QueryDocument;
use crate::output;
use crate::parser::{self, ParseError};

/// Any failure of a translation entry point.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("failed to render query document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Translate a SQL SELECT into a query document.
///
/// ```
/// use sql2es::{translate, Options};
///
/// let doc = translate("SELECT * FROM users WHERE age > 18", &Options::default()).unwrap();
/// assert_eq!(doc.size, 1);
/// ```
pub fn translate(sql: &str, options: &Options) -> Result<QueryDocument, Error> {
    let statement = parser::parse(sql, options.dialect)?;
    let document = Compiler::new(options.strictness).compile(&statement)?;
    Ok(document)
}

/// Translate and render as compact JSON.
pub fn translate_to_json(sql: &str, options: &Options) -> Result<String, Error> {
    Ok(output::to_json(&translate(sql, options)?)?)
}

/// Translate and render as indented JSON.
pub fn translate_pretty(sql: &str, options: &Options) -> Result<String, Error> {
    Ok(output::to_json_pretty(&translate(sql, options)?)?)
}

/// Table targeted by a SELECT, UPDATE, INSERT or DELETE statement.
pub fn table_name(sql: &str, options: &Options) -> Result<String, Error> {
    let statement = parser::parse(sql, options.dialect)?;
    Ok(compiler::target_table(&statement)?.to_string())
}
