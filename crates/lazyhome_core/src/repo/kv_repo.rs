//! Key-value persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Store one JSON document per logical collection.
//! - Give repositories a typed `load_or_default` / `save_json` pair.
//!
//! # Invariants
//! - A write replaces the whole document in one statement; readers never
//!   observe a partially applied update.
//! - Missing keys read as the caller's default.
//! - Malformed documents read as the caller's default and are logged, never
//!   surfaced as a crash.

use crate::db::DbError;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage keys of every persisted collection.
pub mod keys {
    pub const CHORES: &str = "chores";
    pub const WEEKLY_SCHEDULE: &str = "weekly_schedule";
    pub const MEAL_PREFERENCES: &str = "meal_preferences";
    pub const LAST_MEAL_PLAN: &str = "last_meal_plan";
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage failure surfaced by repositories.
///
/// Validation no-ops (blank text, unknown id, out-of-range index) are not
/// errors; repositories report them through `Ok(None)` / `Ok(false)`.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialization {
        key: String,
        source: serde_json::Error,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization { key, source } => {
                write!(f, "failed to serialize `{key}`: {source}")
            }
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization { source, .. } => Some(source),
            Self::MissingRequiredTable(_) => None,
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

/// Raw string storage keyed by collection name.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_raw(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_raw(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set_raw(key, value)
    }
}

/// SQLite-backed key-value store over the `kv_store` table.
///
/// Cheap to copy; every repository gets its own handle to the same
/// connection.
#[derive(Clone, Copy)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when migrations have not created `kv_store`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'
            );",
            [],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(RepoError::MissingRequiredTable("kv_store"));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get_raw(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Reads and decodes `key`, falling back to `default` when it is missing or
/// malformed.
pub fn load_or_default<S, T>(store: &S, key: &str, default: impl FnOnce() -> T) -> RepoResult<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get_raw(key)? else {
        return Ok(default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(
                "event=kv_load module=repo status=error key={} error_code=malformed_document error={}",
                key, err
            );
            Ok(default())
        }
    }
}

/// Encodes `value` and replaces the whole document stored under `key`.
pub fn save_json<S, T>(store: &S, key: &str, value: &T) -> RepoResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| RepoError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set_raw(key, &raw)
}
