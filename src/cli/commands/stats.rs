//! Stats command - message counts for a session.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::{format_time, print_json};
use crate::cli::OutputFormat;
use chat_sessions::storage::SessionStore;

/// Arguments for the stats command.
#[derive(clap::Args)]
pub struct Args {
    /// Session ID to summarize
    #[arg(value_name = "ID")]
    pub session_id: String,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the stats command.
pub fn run(args: Args) -> Result<()> {
    let store = SessionStore::open_default()?;
    let stats = store.get_session_stats(&args.session_id)?;

    match args.format {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Text | OutputFormat::Markdown => {
            println!("{} {}", "Session".bold(), stats.session_id.cyan());
            println!("  Messages:   {}", stats.total_messages);
            println!("  User:       {}", stats.user_messages);
            println!("  Assistant:  {}", stats.assistant_messages);
            println!("  Created:    {}", format_time(&stats.created_at).dimmed());
            println!("  Updated:    {}", format_time(&stats.updated_at).dimmed());
        }
    }

    Ok(())
}
