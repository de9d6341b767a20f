//! Core data models for chat sessions
//!
//! These are the plain records callers see. Connection handles never
//! leave the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::error::StoreError;

/// A Session is one conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Externally supplied identifier, unique per store
    pub id: String,

    /// When the session was first created
    pub created_at: DateTime<Utc>,

    /// Refreshed on every appended message and on close
    pub updated_at: DateTime<Utc>,

    /// Lifecycle state
    pub status: SessionStatus,
}

/// Lifecycle state of a session.
///
/// Sessions only ever move from `Active` to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Accepting messages.
    Active,
    /// Explicitly closed by a caller.
    Closed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SessionStatus::Active),
            "closed" => Ok(SessionStatus::Closed),
            other => Err(StoreError::InvalidStatus(other.to_string())),
        }
    }
}

/// A single stored message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Identity assigned at insert; duplicates of the same text get distinct ids
    pub id: Uuid,

    /// Session this message belongs to (not enforced by the store)
    pub session_id: String,

    /// Who authored this message
    pub role: Role,

    /// The message text
    pub content: String,

    /// When this message was stored
    pub timestamp: DateTime<Utc>,
}

/// The author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A human user message.
    User,
    /// An AI assistant response.
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(StoreError::InvalidRole(other.to_string())),
        }
    }
}

/// One entry of chat history, trimmed to what a model prompt needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl From<Message> for ChatTurn {
    fn from(message: Message) -> Self {
        Self {
            role: message.role,
            content: message.content,
        }
    }
}

/// Message counts and timestamps for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: String,
    pub total_messages: u64,
    pub user_messages: u64,
    pub assistant_messages: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
