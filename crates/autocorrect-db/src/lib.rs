// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod manager;
mod memory;

pub use manager::{DictionaryManager, DictionarySnapshot};
pub use memory::MemoryStore;

use anyhow::{Context, Result, anyhow, bail};
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "autocorrect";
pub const USER_DICT_KEY: &str = "autocorrect_dict";
pub const DB_PATH_ENV: &str = "AUTOCORRECT_DB_PATH";

const DB_FILE_NAME: &str = "autocorrect.db";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Key-value persistence the dictionary manager reads and writes through.
///
/// Calls are issued one at a time; a read followed by a write is not atomic
/// with respect to other processes sharing the same backing store.
pub trait StoragePort {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// SQLite-backed key-value store. Values are kept as JSON text.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        validate_db_path(&path.to_string_lossy())?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory().context("open in-memory database")?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .context("set sqlite busy timeout")?;
        // In-memory databases answer "memory" here; only file databases switch to WAL.
        let journal: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
                .context("set sqlite journal mode")?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .context("set sqlite synchronous mode")?;
        tracing::debug!(journal = %journal, "sqlite connection ready");
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        self.conn
            .execute_batch(include_str!("sql/schema.sql"))
            .context("create schema")
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv ORDER BY key")
            .context("prepare key listing")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect stored keys")
    }
}

impl StoragePort for Store {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("read key {key:?}"))?;

        raw.map(|text| {
            serde_json::from_str(&text).with_context(|| format!("decode JSON stored at {key:?}"))
        })
        .transpose()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let text = serde_json::to_string(&value)
            .with_context(|| format!("encode JSON for {key:?}"))?;
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET
                   value = excluded.value,
                   updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')",
                params![key, text],
            )
            .with_context(|| format!("write key {key:?}"))?;
        tracing::debug!(key, bytes = text.len(), "stored value");
        Ok(())
    }
}

/// Resolves the database file: `AUTOCORRECT_DB_PATH` wins, otherwise the
/// platform's local data directory. The parent directory is created.
pub fn default_db_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(DB_PATH_ENV) {
        return Ok(path.into());
    }

    let dir = dirs::data_local_dir()
        .map(|root| root.join(APP_NAME))
        .ok_or_else(|| anyhow!("no local data directory on this platform; set {DB_PATH_ENV}"))?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir.join(DB_FILE_NAME))
}

/// Accepts `:memory:` and plain filesystem paths. SQLite would read URI-like
/// strings as connection options, so those are refused.
pub fn validate_db_path(path: &str) -> Result<()> {
    match path_rejection(path) {
        Some(reason) => bail!("database path {path:?} {reason}; use a plain filesystem path"),
        None => Ok(()),
    }
}

fn path_rejection(path: &str) -> Option<&'static str> {
    if path.is_empty() {
        return Some("is empty");
    }
    if path == ":memory:" {
        return None;
    }
    if path.starts_with("file:") {
        return Some("uses file: URI syntax");
    }
    if let Some((scheme, _)) = path.split_once("://")
        && !scheme.is_empty()
        && scheme.chars().all(|c| c.is_ascii_alphabetic())
    {
        return Some("looks like a URI");
    }
    if path.contains('?') {
        return Some("carries query parameters");
    }
    None
}
