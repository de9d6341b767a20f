//! Say command - append a message to a session.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::print_json;
use crate::cli::OutputFormat;
use chat_sessions::storage::{Role, SessionStore};

/// Arguments for the say command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    chat-sessions say s1 user \"hi\"           Store a user turn\n    \
    chat-sessions say s1 assistant \"hello\"   Store an assistant turn")]
pub struct Args {
    /// Session ID the message belongs to
    #[arg(value_name = "ID")]
    pub session_id: String,

    /// Message author: user or assistant
    #[arg(value_name = "ROLE")]
    pub role: String,

    /// Message text
    #[arg(value_name = "CONTENT")]
    pub content: String,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the say command.
pub fn run(args: Args) -> Result<()> {
    let role: Role = args.role.parse()?;
    let store = SessionStore::open_default()?;
    let message = store.save_message(&args.session_id, role, &args.content)?;

    match args.format {
        OutputFormat::Json => print_json(&message)?,
        OutputFormat::Text | OutputFormat::Markdown => {
            println!(
                "Saved {} message {} to session {}",
                message.role,
                message.id.to_string().dimmed(),
                message.session_id.cyan()
            );
        }
    }

    Ok(())
}
