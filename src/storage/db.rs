//! SQLite-backed session store
//!
//! Two collections, `sessions` and `messages`, live in one database.
//! Every failure is logged here before it is returned.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

use super::error::{Result, StoreError};
use super::models::{ChatTurn, Message, Role, Session, SessionStats, SessionStatus};
use crate::config::{Config, StoreLocation};

/// Number of history entries returned when callers don't pick a limit.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// How long a write waits on another process holding the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Characters of message content shown in debug logs.
const PREVIEW_CHARS: usize = 100;

/// Connection wrapper for the session and message collections
pub struct SessionStore {
    conn: Mutex<Option<Connection>>,
    location: StoreLocation,
}

impl SessionStore {
    /// Open the store described by `config` and check that it answers.
    pub fn connect(config: &Config) -> Result<Self> {
        tracing::info!(
            "Connecting to session store {} (database: {})",
            config.redacted_uri(),
            config.database
        );

        let location = config.location();
        let conn = Self::open_connection(&location).map_err(|e| {
            tracing::error!("Failed to connect to session store: {}", e);
            e
        })?;

        let store = Self {
            conn: Mutex::new(Some(conn)),
            location,
        };

        if let Err(e) = store.ping().and_then(|_| store.ensure_collections()) {
            tracing::error!("Session store liveness check failed: {}", e);
            return Err(e);
        }

        tracing::info!("Connected to session store: {}", config.database);
        Ok(store)
    }

    /// Open the store configured by the environment
    pub fn open_default() -> Result<Self> {
        Self::connect(&Config::from_env())
    }

    fn open_connection(location: &StoreLocation) -> Result<Connection> {
        let conn = match location {
            StoreLocation::Memory => Connection::open_in_memory()?,
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        StoreError::Unavailable(format!(
                            "cannot create {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
                Connection::open(path)?
            }
        };
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Create both collections if they don't exist yet
    fn ensure_collections(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS sessions (
                    id TEXT PRIMARY KEY,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    status TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS messages (
                    id TEXT PRIMARY KEY,
                    session_id TEXT NOT NULL,
                    role TEXT NOT NULL,
                    content TEXT NOT NULL,
                    timestamp TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_messages_session_timestamp
                    ON messages(session_id, timestamp);
                "#,
            )?;
            Ok(())
        })
    }

    /// Where this store keeps its data.
    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Run a trivial query to prove the connection is alive.
    pub fn ping(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
    }

    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        // A panic mid-query leaves the connection itself usable.
        self.conn
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut guard = self.lock();
        let conn = guard
            .as_mut()
            .ok_or_else(|| StoreError::Unavailable("connection is closed".to_string()))?;
        f(conn)
    }

    // ==================== Sessions ====================

    /// Create a session, or return the existing one with the same id.
    ///
    /// The insert is conditional on the id being new, so concurrent
    /// callers still produce a single record.
    pub fn create_session(&self, session_id: &str) -> Result<Session> {
        let result = self.with_conn(|conn| {
            let created_at = now();
            let session = Session {
                id: session_id.to_string(),
                created_at,
                updated_at: created_at,
                status: SessionStatus::Active,
            };

            let inserted = conn.execute(
                r#"
                INSERT INTO sessions (id, created_at, updated_at, status)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(id) DO NOTHING
                "#,
                params![
                    session.id,
                    format_timestamp(&session.created_at),
                    format_timestamp(&session.updated_at),
                    session.status.as_str(),
                ],
            )?;

            if inserted == 1 {
                tracing::info!("Created new session: {}", session_id);
                return Ok(session);
            }

            tracing::info!("Session {} already exists", session_id);
            find_session(conn, session_id)?
                .ok_or_else(|| StoreError::NotFound(session_id.to_string()))
        });
        logged("creating session", session_id, result)
    }

    /// Get a session by id
    pub fn get_session(&self, session_id: &str) -> Result<Session> {
        let result = self.with_conn(|conn| {
            find_session(conn, session_id)?
                .ok_or_else(|| StoreError::NotFound(session_id.to_string()))
        });
        logged("getting session", session_id, result)
    }

    /// Mark a session as closed.
    ///
    /// Returns `false` when no session has this id; nothing is written then.
    pub fn close_session(&self, session_id: &str) -> Result<bool> {
        let result = self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE sessions SET status = ?2, updated_at = ?3 WHERE id = ?1",
                params![
                    session_id,
                    SessionStatus::Closed.as_str(),
                    format_timestamp(&now())
                ],
            )?;
            Ok(updated > 0)
        });

        match logged("closing session", session_id, result)? {
            true => {
                tracing::info!("Closed session: {}", session_id);
                Ok(true)
            }
            false => {
                tracing::warn!("Cannot close unknown session: {}", session_id);
                Ok(false)
            }
        }
    }

    // ==================== Messages ====================

    /// Append a message and refresh the owning session's `updated_at`.
    ///
    /// Both writes share one transaction. The session reference is
    /// advisory: a message for an unknown session is still stored.
    pub fn save_message(&self, session_id: &str, role: Role, content: &str) -> Result<Message> {
        let result = self.with_conn(|conn| {
            let message = Message {
                id: Uuid::new_v4(),
                session_id: session_id.to_string(),
                role,
                content: content.to_string(),
                timestamp: now(),
            };
            let stamp = format_timestamp(&message.timestamp);

            tracing::debug!(
                "Saving {} message for session {}: {}",
                role,
                session_id,
                preview(content, PREVIEW_CHARS)
            );

            let tx = conn.transaction()?;
            tx.execute(
                r#"
                INSERT INTO messages (id, session_id, role, content, timestamp)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    message.id.to_string(),
                    message.session_id,
                    message.role.as_str(),
                    message.content,
                    stamp,
                ],
            )?;
            let touched = tx.execute(
                "UPDATE sessions SET updated_at = ?2 WHERE id = ?1",
                params![session_id, stamp],
            )?;
            tx.commit()?;

            if touched == 0 {
                tracing::warn!(
                    "Saved message {} for session {} which does not exist",
                    message.id,
                    session_id
                );
            }
            tracing::info!("Saved {} message for session {}", role, session_id);
            Ok(message)
        });
        logged("saving message", session_id, result)
    }

    /// The oldest `limit` messages of a session, as role/content pairs.
    pub fn get_chat_history(&self, session_id: &str, limit: usize) -> Result<Vec<ChatTurn>> {
        let result = self.with_conn(|conn| {
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            let mut stmt = conn.prepare(
                "SELECT role, content FROM messages
                 WHERE session_id = ?1
                 ORDER BY timestamp ASC, rowid ASC
                 LIMIT ?2",
            )?;

            let rows = stmt
                .query_map(params![session_id, limit], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(role, content)| -> Result<ChatTurn> {
                    Ok(ChatTurn {
                        role: decode_role(&role)?,
                        content,
                    })
                })
                .collect()
        });
        logged("retrieving chat history", session_id, result)
    }

    /// Full messages of a session, oldest first.
    pub fn get_messages(&self, session_id: &str) -> Result<Vec<Message>> {
        let result = self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, session_id, role, content, timestamp FROM messages
                 WHERE session_id = ?1
                 ORDER BY timestamp ASC, rowid ASC",
            )?;

            let rows = stmt
                .query_map(params![session_id], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(id, session_id, role, content, timestamp)| -> Result<Message> {
                    Ok(Message {
                        id: Uuid::parse_str(&id)
                            .map_err(|e| StoreError::Corrupt(format!("message id '{id}': {e}")))?,
                        session_id,
                        role: decode_role(&role)?,
                        content,
                        timestamp: parse_timestamp(&timestamp)?,
                    })
                })
                .collect()
        });
        logged("retrieving messages", session_id, result)
    }

    // ==================== Stats ====================

    /// Message counts for a session along with its timestamps.
    pub fn get_session_stats(&self, session_id: &str) -> Result<SessionStats> {
        let result = self.with_conn(|conn| {
            // One read transaction so the session and its counts agree.
            let tx = conn.transaction()?;
            let session = find_session(&tx, session_id)?
                .ok_or_else(|| StoreError::NotFound(session_id.to_string()))?;

            let (total, user, assistant): (i64, i64, i64) = tx.query_row(
                r#"
                SELECT COUNT(*),
                       COALESCE(SUM(role = 'user'), 0),
                       COALESCE(SUM(role = 'assistant'), 0)
                FROM messages
                WHERE session_id = ?1
                "#,
                params![session_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;
            tx.commit()?;

            Ok(SessionStats {
                session_id: session.id,
                total_messages: total.max(0) as u64,
                user_messages: user.max(0) as u64,
                assistant_messages: assistant.max(0) as u64,
                created_at: session.created_at,
                updated_at: session.updated_at,
            })
        });
        logged("getting session stats", session_id, result)
    }

    /// Get total session count
    pub fn session_count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
            Ok(count.max(0) as u64)
        })
    }

    /// Get total message count
    pub fn message_count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
            Ok(count.max(0) as u64)
        })
    }

    // ==================== Connection ====================

    /// Release the connection. Later calls fail with `Unavailable`.
    pub fn close_connection(&self) {
        let Some(conn) = self.lock().take() else {
            return;
        };

        match conn.close() {
            Ok(()) => tracing::info!("Session store connection closed"),
            Err((_, e)) => tracing::warn!("Session store connection closed with error: {}", e),
        }
    }

    /// Whether the connection is still held.
    pub fn is_connected(&self) -> bool {
        self.lock().is_some()
    }
}

fn find_session(conn: &Connection, session_id: &str) -> Result<Option<Session>> {
    let row = conn
        .query_row(
            "SELECT id, created_at, updated_at, status FROM sessions WHERE id = ?1",
            params![session_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    row.map(|(id, created_at, updated_at, status)| -> Result<Session> {
        Ok(Session {
            id,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
            status: status
                .parse()
                .map_err(|e: StoreError| StoreError::Corrupt(e.to_string()))?,
        })
    })
    .transpose()
}

/// Log a failed operation at the level its kind deserves, then pass it on.
fn logged<T>(action: &str, session_id: &str, result: Result<T>) -> Result<T> {
    if let Err(ref e) = result {
        if e.is_not_found() {
            tracing::debug!("{} {}: not found", action, session_id);
        } else {
            tracing::error!("Error {} {}: {}", action, session_id, e);
        }
    }
    result
}

/// Current time at the precision the store keeps.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so stored timestamps sort lexically.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("timestamp '{raw}': {e}")))
}

fn decode_role(raw: &str) -> Result<Role> {
    raw.parse()
        .map_err(|e: StoreError| StoreError::Corrupt(e.to_string()))
}

/// Truncate to at most `max_chars` characters for display.
fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    /// Creates a test store in a temporary directory.
    /// Returns the store and the temp directory (which must be kept alive).
    fn create_test_store() -> (SessionStore, tempfile::TempDir) {
        let dir = tempdir().expect("Failed to create temp directory");
        let config = Config {
            uri: dir.path().to_string_lossy().to_string(),
            database: "test".to_string(),
        };
        let store = SessionStore::connect(&config).expect("Failed to open test store");
        (store, dir)
    }

    fn tick() {
        std::thread::sleep(Duration::from_millis(5));
    }

    // ==================== Connection Tests ====================

    #[test]
    fn test_connect_creates_database_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let config = Config {
            uri: format!("file:{}", dir.path().join("nested").display()),
            database: "chat".to_string(),
        };
        let db_path = dir.path().join("nested").join("chat.db");

        assert!(!db_path.exists(), "Database file should not exist yet");

        let store = SessionStore::connect(&config).expect("Failed to connect");

        assert!(db_path.exists(), "Database file should exist after connect");
        assert_eq!(store.location(), &StoreLocation::File(db_path));
        assert_eq!(store.session_count().unwrap(), 0);
        assert_eq!(store.message_count().unwrap(), 0);
    }

    #[test]
    fn test_connect_fails_when_location_is_unusable() {
        let dir = tempdir().expect("Failed to create temp directory");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let config = Config {
            uri: blocker.to_string_lossy().to_string(),
            database: "chat".to_string(),
        };

        let err = SessionStore::connect(&config)
            .err()
            .expect("Connecting under a regular file should fail");
        assert!(
            matches!(err, StoreError::Unavailable(_)),
            "Startup failure should surface as Unavailable, got {err:?}"
        );
    }

    #[test]
    fn test_data_survives_reconnect() {
        let (store, dir) = create_test_store();
        store.create_session("s1").unwrap();
        store.save_message("s1", Role::User, "hi").unwrap();
        store.close_connection();

        let config = Config {
            uri: dir.path().to_string_lossy().to_string(),
            database: "test".to_string(),
        };
        let reopened = SessionStore::connect(&config).unwrap();

        assert_eq!(reopened.get_session("s1").unwrap().id, "s1");
        assert_eq!(reopened.get_chat_history("s1", 10).unwrap().len(), 1);
    }

    #[test]
    fn test_close_connection_is_idempotent() {
        let store = SessionStore::connect(&Config::in_memory()).unwrap();
        assert!(store.is_connected());

        store.close_connection();
        store.close_connection();

        assert!(!store.is_connected());
        assert!(matches!(
            store.get_session("s1"),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.ping(), Err(StoreError::Unavailable(_))));
    }

    // ==================== Session Tests ====================

    #[test]
    fn test_create_session_is_idempotent() {
        let (store, _dir) = create_test_store();

        let first = store.create_session("s1").expect("Failed to create session");
        tick();
        let second = store.create_session("s1").expect("Failed to re-create session");

        assert_eq!(first, second, "Second create should return the original record");
        assert_eq!(first.status, SessionStatus::Active);
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(store.session_count().unwrap(), 1, "Only one insert should happen");
    }

    #[test]
    fn test_get_session_matches_created_record() {
        let (store, _dir) = create_test_store();

        let created = store.create_session("abc").unwrap();
        let fetched = store.get_session("abc").unwrap();

        assert_eq!(created, fetched);
    }

    #[test]
    fn test_get_nonexistent_session() {
        let (store, _dir) = create_test_store();

        let err = store
            .get_session("missing")
            .expect_err("Unknown session should not be found");

        assert!(
            matches!(err, StoreError::NotFound(ref id) if id == "missing"),
            "Absence should be NotFound, got {err:?}"
        );
    }

    #[test]
    fn test_close_session() {
        let (store, _dir) = create_test_store();
        let created = store.create_session("s1").unwrap();
        tick();

        assert!(store.close_session("s1").unwrap());

        let closed = store.get_session("s1").unwrap();
        assert_eq!(closed.status, SessionStatus::Closed);
        assert!(closed.updated_at > created.updated_at, "updated_at should advance");
        assert_eq!(closed.created_at, created.created_at);
    }

    #[test]
    fn test_close_nonexistent_session_leaves_no_trace() {
        let (store, _dir) = create_test_store();

        let closed = store.close_session("ghost").expect("Closing should not error");

        assert!(!closed);
        assert!(store.get_session("ghost").unwrap_err().is_not_found());
        assert_eq!(store.session_count().unwrap(), 0);
    }

    #[test]
    fn test_create_after_close_keeps_closed_status() {
        let (store, _dir) = create_test_store();
        store.create_session("s1").unwrap();
        store.close_session("s1").unwrap();

        let again = store.create_session("s1").unwrap();

        assert_eq!(again.status, SessionStatus::Closed, "Sessions are never reopened");
    }

    // ==================== Message Tests ====================

    #[test]
    fn test_example_conversation_history() {
        let (store, _dir) = create_test_store();
        store.create_session("s1").unwrap();
        store.save_message("s1", Role::User, "hi").unwrap();
        store.save_message("s1", Role::Assistant, "hello").unwrap();

        let history = store.get_chat_history("s1", DEFAULT_HISTORY_LIMIT).unwrap();

        assert_eq!(
            serde_json::to_value(&history).unwrap(),
            serde_json::json!([
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"}
            ])
        );
    }

    #[test]
    fn test_messages_ordered_by_timestamp() {
        let (store, _dir) = create_test_store();
        store.create_session("s1").unwrap();

        for i in 0..6 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            store.save_message("s1", role, &format!("msg {i}")).unwrap();
        }

        let messages = store.get_messages("s1").unwrap();
        assert_eq!(messages.len(), 6);
        assert!(
            messages.windows(2).all(|w| w[0].timestamp <= w[1].timestamp),
            "Messages should be in non-decreasing timestamp order"
        );
        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["msg 0", "msg 1", "msg 2", "msg 3", "msg 4", "msg 5"]);
    }

    #[test]
    fn test_history_limit_returns_oldest_entries() {
        let (store, _dir) = create_test_store();
        store.create_session("s1").unwrap();
        for i in 0..5 {
            store.save_message("s1", Role::User, &format!("msg {i}")).unwrap();
        }

        let history = store.get_chat_history("s1", 3).unwrap();

        let contents: Vec<_> = history.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["msg 0", "msg 1", "msg 2"]);
        assert!(store.get_chat_history("s1", 0).unwrap().is_empty());
        assert_eq!(store.get_chat_history("s1", usize::MAX).unwrap().len(), 5);
    }

    #[test]
    fn test_history_is_scoped_to_session() {
        let (store, _dir) = create_test_store();
        store.create_session("a").unwrap();
        store.create_session("b").unwrap();
        store.save_message("a", Role::User, "for a").unwrap();
        store.save_message("b", Role::User, "for b").unwrap();

        let history = store.get_chat_history("a", 10).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "for a");
        assert!(store.get_chat_history("nobody", 10).unwrap().is_empty());
    }

    #[test]
    fn test_save_message_refreshes_session_timestamp() {
        let (store, _dir) = create_test_store();
        let created = store.create_session("s1").unwrap();
        tick();

        let message = store.save_message("s1", Role::User, "hi").unwrap();

        let session = store.get_session("s1").unwrap();
        assert_eq!(session.updated_at, message.timestamp);
        assert!(session.updated_at > created.updated_at);
    }

    #[test]
    fn test_save_message_for_unknown_session_still_succeeds() {
        let (store, _dir) = create_test_store();

        store
            .save_message("orphan", Role::Assistant, "anyone there?")
            .expect("Session reference is advisory");

        assert_eq!(store.get_chat_history("orphan", 10).unwrap().len(), 1);
        assert!(store.get_session("orphan").unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_messages_are_kept() {
        let (store, _dir) = create_test_store();
        store.create_session("s1").unwrap();

        let first = store.save_message("s1", Role::User, "same").unwrap();
        let second = store.save_message("s1", Role::User, "same").unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.get_chat_history("s1", 10).unwrap().len(), 2);
    }

    // ==================== Stats Tests ====================

    #[test]
    fn test_session_stats_counts_by_role() {
        let (store, _dir) = create_test_store();
        let created = store.create_session("s1").unwrap();
        for _ in 0..3 {
            store.save_message("s1", Role::User, "question").unwrap();
        }
        for _ in 0..2 {
            store.save_message("s1", Role::Assistant, "answer").unwrap();
        }

        let stats = store.get_session_stats("s1").unwrap();

        assert_eq!(stats.session_id, "s1");
        assert_eq!(stats.total_messages, 5);
        assert_eq!(stats.user_messages, 3);
        assert_eq!(stats.assistant_messages, 2);
        assert_eq!(stats.created_at, created.created_at);
        assert_eq!(stats.updated_at, store.get_session("s1").unwrap().updated_at);
    }

    #[test]
    fn test_session_stats_for_empty_session() {
        let (store, _dir) = create_test_store();
        store.create_session("quiet").unwrap();

        let stats = store.get_session_stats("quiet").unwrap();

        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.user_messages, 0);
        assert_eq!(stats.assistant_messages, 0);
    }

    #[test]
    fn test_session_stats_for_unknown_session() {
        let (store, _dir) = create_test_store();

        assert!(store.get_session_stats("missing").unwrap_err().is_not_found());
    }

    // ==================== Concurrency Tests ====================

    #[test]
    fn test_shared_store_across_threads() {
        let (store, _dir) = create_test_store();
        let store = Arc::new(store);
        store.create_session("busy").unwrap();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..10 {
                        store
                            .save_message("busy", Role::User, &format!("{t}-{i}"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get_session_stats("busy").unwrap().total_messages, 40);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("héllo wörld", 5), "héllo...");
    }
}
