//! Report the table a statement targets

use super::{require_sql, CliError};
use crate::{table_name, Options};

/// Options for the table command
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    pub sql: Option<String>,
    pub options: Options,
}

pub fn execute_table(options: &TableOptions) -> Result<String, CliError> {
    let sql = require_sql(options.sql.as_deref())?;
    Ok(table_name(sql, &options.options)?)
}
