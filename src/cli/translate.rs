//! Translate SQL into a query document

use tracing::debug;

use super::{require_sql, CliError};
use crate::{translate_pretty, translate_to_json, Options};

/// Options for the translate command
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// The SQL statement
    pub sql: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Dialect and strictness
    pub options: Options,
}

/// Execute a translate operation, returning the rendered document
pub fn execute_translate(options: &TranslateOptions) -> Result<String, CliError> {
    let sql = require_sql(options.sql.as_deref())?;
    debug!(pretty = options.pretty, strictness = %options.options.strictness, "translating");

    let json = if options.pretty {
        translate_pretty(sql, &options.options)?
    } else {
        translate_to_json(sql, &options.options)?
    };
    Ok(json)
}
