//! Close command - mark a session as closed.

use anyhow::Result;
use colored::Colorize;

use chat_sessions::storage::SessionStore;

/// Arguments for the close command.
#[derive(clap::Args)]
pub struct Args {
    /// Session ID to close
    #[arg(value_name = "ID")]
    pub session_id: String,
}

/// Executes the close command.
///
/// An unknown id is reported but is not an error.
pub fn run(args: Args) -> Result<()> {
    let store = SessionStore::open_default()?;

    if store.close_session(&args.session_id)? {
        println!("Closed session {}", args.session_id.cyan());
    } else {
        println!(
            "{}",
            format!("No session '{}' to close", args.session_id).yellow()
        );
    }

    Ok(())
}
