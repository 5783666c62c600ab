//! SQLite persistence layer for desk sessions.
//!
//! RULE: Only store.rs talks to the database.
//! The session calls store methods — it never executes SQL directly.

use crate::error::DeskResult;
use rusqlite::{params, Connection};

/// Keys for the persisted session blobs, one per session record.
pub mod keys {
    pub const PRODUCT_INPUT: &str = "product_input";
    pub const MARKET_INPUT: &str = "market_input";
    pub const EXPENSES: &str = "expenses";
    pub const SCENARIOS: &str = "scenarios";
    pub const SETTINGS: &str = "settings";
}

pub struct DeskStore {
    conn: Connection,
}

impl DeskStore {
    /// Open (or create) the desk database at `path`.
    pub fn open(path: &str) -> DeskResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DeskResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> DeskResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    /// Upsert one session blob. The timestamp is stamped here so every
    /// writer records when the blob last changed.
    pub fn save_blob(&self, key: &str, payload: &str) -> DeskResult<()> {
        self.conn.execute(
            "INSERT INTO session_blob (key, payload, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                 payload = excluded.payload,
                 updated_at = excluded.updated_at",
            params![key, payload, chrono::Utc::now().to_rfc3339()],
        )?;
        log::debug!("store: saved blob '{key}'");
        Ok(())
    }

    pub fn load_blob(&self, key: &str) -> DeskResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM session_blob WHERE key = ?1")?;
        let result = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .ok();
        Ok(result)
    }

    /// RFC 3339 timestamp of a blob's last write, if it exists.
    pub fn blob_updated_at(&self, key: &str) -> DeskResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT updated_at FROM session_blob WHERE key = ?1")?;
        let result = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .ok();
        Ok(result)
    }
}
