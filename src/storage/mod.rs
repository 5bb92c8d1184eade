//! Persistent storage using SQLite (rusqlite)
//!
//! Two things survive a restart:
//! - the current game snapshot, stored as JSON under a fixed key
//! - up to [`RECENT_PLAYERS_LIMIT`] recently used player names
//!
//! The database lives in the OS-standard data directory (via `directories`)
//! unless a directory is given explicitly.

use crate::error::InconsistentSnapshot;
use crate::game::Snapshot;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current schema version. Bump this when making schema changes.
const SCHEMA_VERSION: u32 = 1;

const SNAPSHOT_KEY: &str = "game_snapshot";
const RECENT_PLAYERS_KEY: &str = "recent_players";

/// How many recent player names are remembered.
pub const RECENT_PLAYERS_LIMIT: usize = 15;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("could not encode or decode stored data: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("could not determine data directory")]
    NoDataDirectory,
    #[error("failed to create data directory: {0}")]
    CreateDirFailed(#[source] std::io::Error),
    #[error("database schema version {found} is newer than supported version {supported}")]
    FutureSchemaVersion { found: u32, supported: u32 },
    #[error(transparent)]
    Inconsistent(#[from] InconsistentSnapshot),
}

/// The storage handle for saved games and recent players.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the database in `data_dir`, or in the OS-standard
    /// directory when none is given:
    /// - Linux: `$XDG_DATA_HOME/hat/` or `~/.local/share/hat/`
    /// - macOS: `~/Library/Application Support/hat/`
    pub fn open(data_dir: Option<&Path>) -> Result<Self, StorageError> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::data_dir()?,
        };
        std::fs::create_dir_all(&data_dir).map_err(StorageError::CreateDirFailed)?;

        let conn = Connection::open(data_dir.join("hat.db"))?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        tracing::debug!(path = %data_dir.display(), "storage opened");
        Ok(storage)
    }

    /// Open an in-memory database (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let storage = Storage {
            conn: Connection::open_in_memory()?,
        };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Get the OS-standard data directory for the game.
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("", "", "hat")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StorageError::NoDataDirectory)
    }

    /// Write the full snapshot. Writing the same snapshot twice is harmless.
    pub fn save_snapshot(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let json = serde_json::to_string(snapshot)?;
        self.put(SNAPSHOT_KEY, &json)
    }

    /// The stored snapshot, if any. Fails when the stored data does not parse
    /// or breaks the snapshot invariants.
    pub fn load_snapshot(&self) -> Result<Option<Snapshot>, StorageError> {
        let Some(json) = self.get(SNAPSHOT_KEY)? else {
            return Ok(None);
        };
        let snapshot: Snapshot = serde_json::from_str(&json)?;
        snapshot.check_invariants()?;
        Ok(Some(snapshot))
    }

    /// The snapshot to start from: the stored one, or a fresh default when
    /// nothing usable is stored.
    pub fn restore_snapshot(&self) -> Snapshot {
        match self.load_snapshot() {
            Ok(Some(snapshot)) => {
                tracing::info!(phase = snapshot.phase.name(), "restored saved game");
                snapshot
            }
            Ok(None) => Snapshot::default(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable saved game");
                Snapshot::default()
            }
        }
    }

    pub fn clear_snapshot(&self) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![SNAPSHOT_KEY])?;
        Ok(())
    }

    /// Recently used player names, most recent first.
    pub fn recent_players(&self) -> Result<Vec<String>, StorageError> {
        match self.get(RECENT_PLAYERS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Put `names` at the front of the recent list and return the new list.
    pub fn remember_players(&self, names: &[String]) -> Result<Vec<String>, StorageError> {
        let existing = self.recent_players().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "recent players list unreadable, starting over");
            Vec::new()
        });
        let merged = merge_recent(names, &existing, RECENT_PLAYERS_LIMIT);
        self.put(RECENT_PLAYERS_KEY, &serde_json::to_string(&merged)?)?;
        Ok(merged)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let updated_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, updated_at],
        )?;
        Ok(())
    }

    fn initialize_schema(&self) -> Result<(), StorageError> {
        let current_version = self.get_schema_version()?;

        if current_version == 0 {
            self.create_schema_v1()?;
        } else if current_version > SCHEMA_VERSION {
            return Err(StorageError::FutureSchemaVersion {
                found: current_version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<u32, StorageError> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version: u32 = self
            .conn
            .query_row("SELECT schema_version FROM meta LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        Ok(version)
    }

    fn create_schema_v1(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS meta (
                schema_version INTEGER NOT NULL
            );

            -- Keyed JSON documents
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;
        self.conn.execute("DELETE FROM meta", [])?;
        self.conn.execute(
            "INSERT INTO meta (schema_version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }
}

/// Merge `new` names in front of `existing`, dropping case-insensitive
/// repeats (first occurrence wins) and keeping at most `limit`.
pub fn merge_recent(new: &[String], existing: &[String], limit: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for name in new.iter().chain(existing) {
        let name = name.trim();
        let folded = name.to_lowercase();
        if name.is_empty() || merged.iter().any(|m| m.to_lowercase() == folded) {
            continue;
        }
        merged.push(name.to_string());
        if merged.len() == limit {
            break;
        }
    }
    merged
}
