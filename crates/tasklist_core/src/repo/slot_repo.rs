//! Key-value slot contracts with SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Provide `read_slot`/`write_slot` over a single durable key space.
//! - Report storage failures as semantic `RepoError` values.
//!
//! # Invariants
//! - Absent keys read as `None`, never as an error.
//! - A failed write leaves the previous value in place.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for slot reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Write would exceed the store's byte quota.
    QuotaExceeded { needed: usize, limit: usize },
    /// Backend refused the operation (e.g. storage disabled).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded { needed, limit } => {
                write!(f, "storage quota exceeded: need {needed} bytes, limit {limit}")
            }
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value slot contract.
pub trait SlotStore {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for Box<S> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_slot(key, value)
    }
}

/// SQLite-backed slot store over the `kv_slots` table.
pub struct SqliteSlotStore {
    conn: Connection,
}

impl SqliteSlotStore {
    /// Wraps a connection that already has migrations applied.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens a database file, applying migrations.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a volatile in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }
}

impl SlotStore for SqliteSlotStore {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Volatile slot store with an optional byte quota.
#[derive(Debug, Default, Clone)]
pub struct MemorySlotStore {
    slots: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose total `key + value` bytes may not exceed `limit`.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            slots: HashMap::new(),
            quota_bytes: Some(limit),
        }
    }

    /// Seeds a raw value, bypassing the quota.
    pub fn with_raw(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.slots
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        if let Some(limit) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(RepoError::QuotaExceeded { needed, limit });
            }
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
