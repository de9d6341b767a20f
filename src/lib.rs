//! chat-sessions - persistence for chat conversations
//!
//! Stores sessions and their message history, keyed by an externally
//! supplied session id.

pub mod config;
pub mod storage;
