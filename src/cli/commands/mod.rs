//! CLI commands for chat-sessions.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Close a session.
pub mod close;

/// Show the resolved configuration.
pub mod config;

/// Create a session (or fetch the existing one).
pub mod create;

/// Print the chat history of a session.
pub mod history;

/// Append a message to a session.
pub mod say;

/// Display a session record and its messages.
pub mod show;

/// Message counts for a session.
pub mod stats;

/// Check the store and show totals.
pub mod status;
