//! Key-value store contract with SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Provide synchronous `read(key, default)` / `write(key, value)` over JSON.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - A missing key reads as the caller's default.
//! - A stored value that no longer decodes reads as the default and is
//!   reported with a warning; it is overwritten by the next write.
//! - Writes replace the whole value for a key.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const KV_TABLE: &str = "kv_entries";
const KV_REQUIRED_COLUMNS: &[&str] = &["key", "value", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for key-value persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection was not bootstrapped through `open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Value for `key` could not be encoded as JSON.
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode { source, .. } => Some(source),
            _ => None,
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

/// Raw string storage keyed by stable identifiers.
pub trait KeyValueStore {
    fn read_raw(&self, key: &str) -> RepoResult<Option<String>>;
    fn write_raw(&self, key: &str, value: &str) -> RepoResult<()>;
    fn remove(&self, key: &str) -> RepoResult<()>;
    fn keys(&self) -> RepoResult<Vec<String>>;
}

/// Reads and decodes the value at `key`, or returns `default`.
pub fn read_value<S, T>(store: &S, key: &str, default: T) -> RepoResult<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.read_raw(key)? else {
        return Ok(default);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!("event=kv_read module=repo status=fallback key={key} error={err}");
            Ok(default)
        }
    }
}

/// Encodes `value` as JSON and stores it at `key`.
pub fn write_value<S, T>(store: &S, key: &str, value: &T) -> RepoResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| RepoError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.write_raw(key, &raw)
}

/// SQLite-backed key-value store.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection produced by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema is
    ///   not the one this binary expects.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let columns = table_columns(conn, KV_TABLE)?;
        if columns.is_empty() {
            return Err(RepoError::MissingRequiredTable(KV_TABLE));
        }
        for &column in KV_REQUIRED_COLUMNS {
            if !columns.iter().any(|existing| existing == column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: KV_TABLE,
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn read_raw(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_raw(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn keys(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

/// Process-local store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read_raw(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write_raw(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> RepoResult<Vec<String>> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read_raw(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_raw(key)
    }

    fn write_raw(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_raw(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> RepoResult<Vec<String>> {
        (**self).keys()
    }
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
