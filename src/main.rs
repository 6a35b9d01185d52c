use clap::{Parser as ClapParser, Subcommand};
use sql2es::cli::{self, CliError, TableOptions, TranslateOptions};
use sql2es::{Options, SqlDialect, Strictness};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "sql2es")]
#[command(about = "sql2es - Translate SQL SELECT statements into search-engine query documents")]
#[command(version)]
struct Cli {
    /// Log compiler decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a SELECT statement into a query document
    Translate {
        /// The SQL statement (reads from stdin if not provided)
        sql: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Fail instead of falling back on untranslatable predicates and functions
        #[arg(long)]
        strict: bool,

        /// SQL dialect: generic, mysql or postgres
        #[arg(short, long, default_value_t = SqlDialect::Generic)]
        dialect: SqlDialect,
    },

    /// Print the table a statement targets
    Table {
        /// The SQL statement (reads from stdin if not provided)
        sql: Option<String>,

        /// SQL dialect: generic, mysql or postgres
        #[arg(short, long, default_value_t = SqlDialect::Generic)]
        dialect: SqlDialect,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Translate {
            sql,
            pretty,
            strict,
            dialect,
        } => run_translate(sql, pretty, strict, dialect),
        Commands::Table { sql, dialect } => run_table(sql, dialect),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_sql(sql: Option<String>) -> Result<Option<String>, CliError> {
    match sql {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_translate(
    sql: Option<String>,
    pretty: bool,
    strict: bool,
    dialect: SqlDialect,
) -> Result<(), CliError> {
    let strictness = if strict {
        Strictness::Strict
    } else {
        Strictness::Permissive
    };

    let options = TranslateOptions {
        sql: read_sql(sql)?,
        pretty,
        options: Options {
            dialect,
            strictness,
        },
    };

    println!("{}", cli::execute_translate(&options)?);
    Ok(())
}

fn run_table(sql: Option<String>, dialect: SqlDialect) -> Result<(), CliError> {
    let options = TableOptions {
        sql: read_sql(sql)?,
        options: Options::default().with_dialect(dialect),
    };

    println!("{}", cli::execute_table(&options)?);
    Ok(())
}
