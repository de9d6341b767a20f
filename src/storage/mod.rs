//! Storage layer for chat sessions

pub mod db;
pub mod error;
pub mod models;
pub mod shared;

pub use db::{SessionStore, DEFAULT_HISTORY_LIMIT};
pub use error::StoreError;
pub use models::*;
pub use shared::{close_store, get_store};
