//! Persistent slot store for rosterbook.
//!
//! This module provides `SQLite`-based persistence modeled as a named
//! key-value slot: the whole user collection is serialized to JSON and
//! written under one fixed key, then read back wholesale at startup.

pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::UserRecord;

/// The fixed slot key under which the user collection is stored.
pub const USERS_SLOT: &str = "users";

/// Persistent store holding the serialized user collection.
///
/// There is exactly one reader and one writer (the registry that owns this
/// store), so every write replaces the slot unconditionally.
#[derive(Debug)]
pub struct SlotStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SlotStore {
    /// Open or create a store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        // Initialize schema
        schema::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the user collection from its slot.
    ///
    /// Returns `None` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read fails or the slot contents
    /// are not valid JSON. Callers that load at startup treat both the
    /// same way as an absent slot.
    pub fn read_records(&self) -> Result<Option<Vec<UserRecord>>> {
        let raw = self.read_slot(USERS_SLOT)?;
        match raw {
            Some(json) => {
                let records: Vec<UserRecord> = serde_json::from_str(&json)?;
                debug!("Loaded {} records from slot '{}'", records.len(), USERS_SLOT);
                Ok(Some(records))
            }
            None => Ok(None),
        }
    }

    /// Write the full user collection to its slot, replacing any previous
    /// contents.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn write_records(&self, records: &[UserRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.write_slot(USERS_SLOT, &json)?;
        debug!("Persisted {} records to slot '{}'", records.len(), USERS_SLOT);
        Ok(())
    }

    /// Read a raw slot value.
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Overwrite a raw slot value.
    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            (key, value),
        )?;
        Ok(())
    }
}
