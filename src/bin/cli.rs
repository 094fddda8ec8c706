//! filekv CLI
//!
//! Command-line interface for inspecting and editing a filekv snapshot file.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use filekv::{Config, Logger, PersistMode, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// filekv CLI
#[derive(Parser, Debug)]
#[command(name = "filekv-cli")]
#[command(about = "CLI for filekv snapshot files")]
#[command(version)]
struct Args {
    /// Backing snapshot file
    #[arg(short, long, default_value = "./filekv.json")]
    file: String,

    /// Write via temp file + rename instead of rewriting in place
    #[arg(long)]
    atomic: bool,

    /// fsync after every write
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// List all keys in sorted order
    Keys,

    /// Print every entry as pretty JSON
    Dump,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,filekv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> filekv::Result<ExitCode> {
    let mode = if args.atomic {
        PersistMode::AtomicReplace
    } else {
        PersistMode::Rewrite
    };

    let config = Config::builder()
        .path(&args.file)
        .persist_mode(mode)
        .sync_on_persist(args.sync)
        .logger(Logger::new("filekv-cli"))
        .build();

    let store = Store::open(config)?;

    let code = match args.command {
        Commands::Get { key } => match store.get(&key)? {
            Some(value) => {
                println!("{}", value);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("(nil)");
                ExitCode::FAILURE
            }
        },
        Commands::Set { key, value } => {
            store.set(&key, &value)?;
            println!("OK");
            ExitCode::SUCCESS
        }
        Commands::Del { key } => {
            let existed = store.delete(&key)?;
            println!("{}", if existed { 1 } else { 0 });
            ExitCode::SUCCESS
        }
        Commands::Keys => {
            for key in store.keys()? {
                println!("{}", key);
            }
            ExitCode::SUCCESS
        }
        Commands::Dump => {
            let entries = store.memories()?;
            let pretty = serde_json::to_string_pretty(&entries)
                .map_err(filekv::FileKvError::Encode)?;
            println!("{}", pretty);
            ExitCode::SUCCESS
        }
    };

    store.close()?;
    Ok(code)
}
