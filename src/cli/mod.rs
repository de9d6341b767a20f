//! Command-line interface for chat-sessions.
//!
//! Exposes every store operation so sessions can be inspected and
//! edited from a shell or a script.

/// Individual CLI command implementations.
pub mod commands;

/// Output format shared by all commands.
pub mod format;

pub use format::OutputFormat;
