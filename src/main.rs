use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "chat-sessions")]
#[command(version)]
#[command(about = "Persist chat sessions and their message history")]
#[command(long_about = "chat-sessions stores conversations keyed by a session ID.\n\
    Each session keeps its creation time, last update and status;\n\
    messages are appended in order and never rewritten.\n\n\
    The store location comes from CHAT_SESSIONS_URI and\n\
    CHAT_SESSIONS_DATABASE.")]
#[command(after_help = "EXAMPLES:\n    \
    chat-sessions create s1                    Start a session\n    \
    chat-sessions say s1 user \"hi\"             Append a message\n    \
    chat-sessions history s1                   Print the conversation\n    \
    chat-sessions stats s1                     Count messages by role\n    \
    chat-sessions close s1                     Close the session\n\n\
    For more information about a command, run 'chat-sessions <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Check that the store is reachable and show totals
    Status(commands::status::Args),

    /// Create a session, or print it if it already exists
    Create(commands::create::Args),

    /// Show a session record
    Show(commands::show::Args),

    /// Append a message to a session
    #[command(long_about = "Stores one message for a session and refreshes the\n\
        session's update time. ROLE must be 'user' or 'assistant'.")]
    Say(commands::say::Args),

    /// Print the oldest messages of a session
    History(commands::history::Args),

    /// Show message counts for a session
    Stats(commands::stats::Args),

    /// Mark a session as closed
    Close(commands::close::Args),

    /// Show the resolved configuration
    Config(commands::config::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "chat_sessions=debug"
    } else {
        "chat_sessions=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Status(args) => commands::status::run(args),
        Commands::Create(args) => commands::create::run(args),
        Commands::Show(args) => commands::show::run(args),
        Commands::Say(args) => commands::say::run(args),
        Commands::History(args) => commands::history::run(args),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Close(args) => commands::close::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
