//! Status command - check the store.
//!
//! Connecting runs the liveness check, so reaching the totals means the
//! store is usable.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::format::print_json;
use crate::cli::OutputFormat;
use chat_sessions::config::{Config, StoreLocation};
use chat_sessions::storage::SessionStore;

/// Arguments for the status command.
#[derive(clap::Args)]
pub struct Args {
    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct StatusOutput {
    location: String,
    database: String,
    sessions: u64,
    messages: u64,
}

/// Executes the status command.
pub fn run(args: Args) -> Result<()> {
    let config = Config::from_env();
    let store = SessionStore::connect(&config)?;

    let output = StatusOutput {
        location: match store.location() {
            StoreLocation::Memory => "memory".to_string(),
            StoreLocation::File(path) => path.display().to_string(),
        },
        database: config.database.clone(),
        sessions: store.session_count()?,
        messages: store.message_count()?,
    };
    store.close_connection();

    match args.format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Text | OutputFormat::Markdown => {
            println!("{} {}", "Session store".bold(), "reachable".green());
            println!("  Location:  {}", output.location);
            println!("  Database:  {}", output.database);
            println!("  Sessions:  {}", output.sessions);
            println!("  Messages:  {}", output.messages);
        }
    }

    Ok(())
}
