//! pbsqlite store inspection CLI.
//!
//! Provides the `pbsqlite` binary for looking into a record store: listing
//! tables, checking for a table, and reading or writing `pbstore` blobs.
//!
//! The database path comes from `--db`, falling back to the
//! `PBSQLITE_DB_PATH` environment variable and then `pbsqlite.db`.
//!
//! Exit codes: 0 success, 1 table missing (`exists`), 2 store error,
//! 3 the store could not be opened.

use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};

use pbsqlite_storage::{OpenMode, SqliteStore, StorageError, StoreConfig};

const EXIT_TABLE_MISSING: i32 = 1;
const EXIT_STORE_ERROR: i32 = 2;
const EXIT_OPEN_FAILED: i32 = 3;

/// Record store inspection tools.
#[derive(Parser)]
#[command(name = "pbsqlite", about = "Inspect pbsqlite record stores")]
struct Cli {
    /// Path to the database file.
    #[arg(short, long, global = true)]
    db: Option<String>,

    /// Busy timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 0)]
    busy_timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the table count and table names.
    Tables {
        /// Print JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Exit 0 if the table exists, 1 if it does not, 2 on a store error.
    Exists {
        /// Table name.
        table: String,
    },
    /// Print the blob stored under an id (empty if none).
    Get {
        id: String,
    },
    /// Store a blob under an id, replacing any previous value.
    Save {
        id: String,
        value: String,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let db_path = cli
        .db
        .or_else(|| std::env::var("PBSQLITE_DB_PATH").ok())
        .unwrap_or_else(|| "pbsqlite.db".to_string());

    let mode = match cli.command {
        Commands::Save { .. } => OpenMode::ReadWriteCreate,
        _ => OpenMode::ReadOnly,
    };
    let config = StoreConfig::new(&db_path)
        .with_mode(mode)
        .with_busy_timeout(Duration::from_millis(cli.busy_timeout_ms));

    let store = match SqliteStore::open(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_OPEN_FAILED);
        }
    };

    process::exit(exit_code(run(&store, cli.command)));
}

/// Maps a subcommand result to the process exit code, reporting errors.
fn exit_code(result: Result<i32, StorageError>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_STORE_ERROR
        }
    }
}

/// Executes one subcommand and returns the process exit code.
fn run(store: &SqliteStore, command: Commands) -> Result<i32, StorageError> {
    match command {
        Commands::Tables { json } => {
            let names = store.table_names()?;
            if json {
                let out = serde_json::json!({
                    "count": store.table_count()?,
                    "tables": names,
                });
                println!("{}", out);
            } else {
                println!("{} table(s)", store.table_count()?);
                for name in names {
                    println!("  {}", name);
                }
            }
            Ok(0)
        }
        Commands::Exists { table } => {
            let exists = store.table_exists_named(&table)?;
            tracing::debug!(%table, exists, "table lookup");
            Ok(if exists { 0 } else { EXIT_TABLE_MISSING })
        }
        Commands::Get { id } => {
            println!("{}", store.get(&id)?);
            Ok(0)
        }
        Commands::Save { id, value } => {
            store.save(&id, &value)?;
            Ok(0)
        }
    }
}
