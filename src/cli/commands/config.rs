//! Config command - show the resolved configuration.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::print_json;
use crate::cli::OutputFormat;
use chat_sessions::config::{Config, DATABASE_ENV, URI_ENV};

/// Arguments for the config command.
#[derive(clap::Args)]
pub struct Args {
    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: Args) -> Result<()> {
    let config = Config::from_env();

    match args.format {
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Text | OutputFormat::Markdown => {
            println!("{}", "chat-sessions configuration".bold());
            println!();
            println!("  {}  {}", "URI:     ".dimmed(), config.uri);
            println!("  {}  {}", "Database:".dimmed(), config.database);
            println!();
            println!(
                "{}",
                format!("Set {URI_ENV} and {DATABASE_ENV} to change these.").dimmed()
            );
        }
    }

    Ok(())
}
