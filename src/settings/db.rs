use std::path::Path;
use std::sync::Mutex;

use anyhow::{Error, Result, anyhow};
use rusqlite::{Connection, OptionalExtension};

use super::KeyValue;

/// Settings persisted to a SQLite file. Reopening the same path sees
/// everything written before.
pub struct SqliteSettingsStore {
    conn: Mutex<Connection>,
}

impl SqliteSettingsStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, Error> {
        initialize_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, Error> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("Settings connection lock poisoned"))?;
        Ok(f(&conn)?)
    }
}

pub fn initialize_db(conn: &Connection) -> Result<(), Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

impl KeyValue for SqliteSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM settings WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                [key, value],
            )
        })?;
        tracing::debug!("Saved setting {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.with_conn(|conn| conn.execute("DELETE FROM settings WHERE key = ?", [key]))?;
        Ok(())
    }
}
