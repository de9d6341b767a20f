//! Configuration management
//!
//! Settings come from the environment. Unset or empty variables fall
//! back to a local store under the home directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the store location.
pub const URI_ENV: &str = "CHAT_SESSIONS_URI";

/// Environment variable naming the database inside the store location.
pub const DATABASE_ENV: &str = "CHAT_SESSIONS_DATABASE";

/// Database name used when none is configured.
pub const DEFAULT_DATABASE: &str = "jac_gpt";

/// URI that selects a private in-memory store.
pub const MEMORY_URI: &str = "memory:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Store location: a directory, a `file:` directory, or `memory:`
    pub uri: String,

    /// Database name; the file is `<name>.db` inside the location
    pub database: String,
}

/// Where a config points the store at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Nothing touches disk; contents vanish with the connection.
    Memory,
    /// A database file on disk.
    File(PathBuf),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl Config {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let uri = match non_empty(URI_ENV) {
            Some(uri) => uri,
            None => {
                tracing::debug!("{} not set, falling back to local store", URI_ENV);
                default_uri()
            }
        };
        let database = non_empty(DATABASE_ENV).unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        Self { uri, database }
    }

    /// Config for a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Self {
            uri: MEMORY_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }

    /// Resolve the URI and database name into a concrete location.
    pub fn location(&self) -> StoreLocation {
        let uri = self.uri.trim();
        if uri == MEMORY_URI {
            return StoreLocation::Memory;
        }

        let dir = uri.strip_prefix("file:").unwrap_or(uri);
        StoreLocation::File(PathBuf::from(dir).join(format!("{}.db", self.database)))
    }

    /// URI shortened for log lines.
    pub fn redacted_uri(&self) -> String {
        const SHOWN: usize = 30;
        if self.uri.chars().count() <= SHOWN {
            self.uri.clone()
        } else {
            format!("{}...", self.uri.chars().take(SHOWN).collect::<String>())
        }
    }
}

fn default_uri() -> String {
    dirs::home_dir()
        .map(|h| h.join(".chat-sessions"))
        .unwrap_or_else(|| PathBuf::from(".chat-sessions"))
        .to_string_lossy()
        .to_string()
}
