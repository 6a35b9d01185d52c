//! CLI support for sql2es
//!
//! Provides programmatic access to the `sql2es` command functionality so it
//! can be embedded in other tools.

mod table;
mod translate;

pub use table::{execute_table, TableOptions};
pub use translate::{execute_translate, TranslateOptions};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Parse, compile or render failure
    #[error(transparent)]
    Translate(#[from] crate::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No SQL given as an argument or on stdin
    #[error("No SQL provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}

/// Returns the SQL text, or `NoInput` when it is missing or blank.
fn require_sql(sql: Option<&str>) -> Result<&str, CliError> {
    match sql.map(str::trim) {
        Some(sql) if !sql.is_empty() => Ok(sql),
        _ => Err(CliError::NoInput),
    }
}
