//! History command - print a session's conversation.
//!
//! Shows the oldest messages first, trimmed to role and content, the
//! same shape a chat prompt is built from.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::print_json;
use crate::cli::OutputFormat;
use chat_sessions::storage::{ChatTurn, Role, SessionStore, DEFAULT_HISTORY_LIMIT};

/// Arguments for the history command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    chat-sessions history s1               Oldest 50 messages\n    \
    chat-sessions history s1 --limit 10    Oldest 10 messages\n    \
    chat-sessions history s1 -f markdown   Transcript as markdown")]
pub struct Args {
    /// Session ID to read
    #[arg(value_name = "ID")]
    pub session_id: String,

    /// Maximum number of messages to return
    #[arg(short, long, default_value_t = DEFAULT_HISTORY_LIMIT, value_name = "N")]
    pub limit: usize,

    /// Output format: text (default), json, markdown
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the history command.
pub fn run(args: Args) -> Result<()> {
    let store = SessionStore::open_default()?;
    let history = store.get_chat_history(&args.session_id, args.limit)?;

    match args.format {
        OutputFormat::Json => print_json(&history)?,
        OutputFormat::Markdown => print!("{}", render_markdown(&args.session_id, &history)),
        OutputFormat::Text => {
            if history.is_empty() {
                println!("{}", "No messages found.".dimmed());
            }
            for turn in &history {
                let role = match turn.role {
                    Role::User => turn.role.to_string().blue().bold(),
                    Role::Assistant => turn.role.to_string().green().bold(),
                };
                println!("{role}: {}", turn.content);
            }
        }
    }

    Ok(())
}

fn render_markdown(session_id: &str, history: &[ChatTurn]) -> String {
    let mut out = format!("# Session {session_id}\n");
    for turn in history {
        let heading = match turn.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        out.push_str(&format!("\n**{heading}:**\n\n{}\n", turn.content));
    }
    out
}
