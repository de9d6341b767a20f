//! Show command - display a session.
//!
//! Prints the session record and, with `--messages`, every stored
//! message with its id and timestamp.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::format::{format_time, print_json};
use crate::cli::OutputFormat;
use chat_sessions::storage::{Message, Session, SessionStatus, SessionStore};

/// Arguments for the show command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    chat-sessions show s1                 Show session 's1'\n    \
    chat-sessions show s1 --messages      Include every message\n    \
    chat-sessions show s1 -f json         Output as JSON")]
pub struct Args {
    /// Session ID to show
    #[arg(value_name = "ID")]
    pub session_id: String,

    /// Also list the session's messages
    #[arg(short, long)]
    pub messages: bool,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ShowOutput {
    session: Session,
    #[serde(skip_serializing_if = "Option::is_none")]
    messages: Option<Vec<Message>>,
}

/// Executes the show command.
pub fn run(args: Args) -> Result<()> {
    let store = SessionStore::open_default()?;
    let session = store.get_session(&args.session_id)?;
    let messages = if args.messages {
        Some(store.get_messages(&args.session_id)?)
    } else {
        None
    };

    match args.format {
        OutputFormat::Json => print_json(&ShowOutput { session, messages })?,
        OutputFormat::Text | OutputFormat::Markdown => {
            print_session(&session);
            if let Some(messages) = messages {
                println!();
                if messages.is_empty() {
                    println!("{}", "No messages yet.".dimmed());
                }
                for message in &messages {
                    println!(
                        "{}  {}  {}",
                        format_time(&message.timestamp).dimmed(),
                        message.role.to_string().bold(),
                        message.id.to_string().dimmed()
                    );
                    println!("{}", message.content);
                    println!();
                }
            }
        }
    }

    Ok(())
}

/// Prints a session record in the text format.
pub(crate) fn print_session(session: &Session) {
    let status = match session.status {
        SessionStatus::Active => session.status.to_string().green(),
        SessionStatus::Closed => session.status.to_string().yellow(),
    };

    println!("{} {}", "Session".bold(), session.id.cyan());
    println!("  {}  {}", "Status: ".dimmed(), status);
    println!("  {}  {}", "Created:".dimmed(), format_time(&session.created_at));
    println!("  {}  {}", "Updated:".dimmed(), format_time(&session.updated_at));
}
