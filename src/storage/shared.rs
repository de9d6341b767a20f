//! Process-wide shared store.
//!
//! Most code should build a `SessionStore` once and pass it around. This
//! module serves callers that have no place to thread a handle through:
//! the first `get_store` connects from the environment and later calls
//! hand out the same instance until `close_store`.

use std::sync::{Arc, Mutex, PoisonError};

use super::db::SessionStore;
use super::error::Result;
use crate::config::Config;

static SHARED: Mutex<Option<Arc<SessionStore>>> = Mutex::new(None);

/// Get the shared store, connecting from the environment on first use.
pub fn get_store() -> Result<Arc<SessionStore>> {
    get_store_with(Config::from_env)
}

/// Like [`get_store`], with the config built by `config` on first use only.
pub fn get_store_with<F>(config: F) -> Result<Arc<SessionStore>>
where
    F: FnOnce() -> Config,
{
    let mut shared = SHARED.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(store) = shared.as_ref() {
        tracing::debug!("Using existing session store instance");
        return Ok(Arc::clone(store));
    }

    tracing::debug!("Creating new session store instance");
    let store = Arc::new(SessionStore::connect(&config())?);
    *shared = Some(Arc::clone(&store));
    Ok(store)
}

/// Close the shared store's connection and forget it.
///
/// Handles obtained earlier stay valid as values but their operations
/// fail with `Unavailable` afterwards.
pub fn close_store() {
    let store = SHARED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();

    if let Some(store) = store {
        store.close_connection();
    }
}
