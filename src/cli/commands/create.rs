//! Create command - start a session.
//!
//! Creating an id that already exists is not an error; the stored
//! record is printed unchanged.

use anyhow::Result;

use crate::cli::format::print_json;
use crate::cli::OutputFormat;
use chat_sessions::storage::SessionStore;

/// Arguments for the create command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    chat-sessions create s1              Create session 's1'\n    \
    chat-sessions create s1 -f json      Print the record as JSON")]
pub struct Args {
    /// Session ID to create
    #[arg(value_name = "ID")]
    pub session_id: String,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the create command.
pub fn run(args: Args) -> Result<()> {
    let store = SessionStore::open_default()?;
    let session = store.create_session(&args.session_id)?;

    match args.format {
        OutputFormat::Json => print_json(&session)?,
        OutputFormat::Text | OutputFormat::Markdown => super::show::print_session(&session),
    }

    Ok(())
}
