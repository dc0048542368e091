//! Persisted local preferences.
//!
//! Small key-value store for device-local settings: the dark-mode flag
//! and the last safety check-in. One source of truth with an explicit
//! persistence boundary: values are loaded once when the store opens and
//! written back on every change, never re-read ad hoc by callers.

// SQLite operations need to hold the lock for the duration of the operation.
#![allow(clippy::significant_drop_tightening)]

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

const KEY_DARK_MODE: &str = "dark_mode";
const KEY_LAST_SAFETY_CHECK_IN: &str = "last_safety_check_in";

/// Error type for preference operations.
#[derive(Error, Debug)]
pub enum PreferencesError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database error from `SQLite`.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for preference operations.
pub type Result<T> = std::result::Result<T, PreferencesError>;

/// Device-local preference store.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use aegis_core::prefs::Preferences;
///
/// let prefs = Preferences::new(Path::new("/data/aegis/prefs.db"))?;
/// prefs.set_dark_mode(true)?;
/// assert!(prefs.is_dark_mode());
/// ```
pub struct Preferences {
    conn: Mutex<Connection>,
    dark_mode: AtomicBool,
}

impl Preferences {
    /// Opens (or creates) the preference store at the given path and
    /// loads the cached values.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or initialized.
    pub fn new(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Creates an in-memory preference store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
            dark_mode: AtomicBool::new(false),
        };
        store.initialize_schema()?;

        let dark_mode = store.read(KEY_DARK_MODE)?.as_deref() == Some("true");
        store.dark_mode.store(dark_mode, Ordering::Release);

        Ok(store)
    }

    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the cached dark-mode flag.
    #[must_use]
    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode.load(Ordering::Acquire)
    }

    /// Sets the dark-mode flag, persisting it immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.write(KEY_DARK_MODE, if enabled { "true" } else { "false" })?;
        self.dark_mode.store(enabled, Ordering::Release);
        Ok(())
    }

    /// Flips the dark-mode flag and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn toggle_dark_mode(&self) -> Result<bool> {
        let enabled = !self.is_dark_mode();
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }

    /// Records a safety check-in now and returns the recorded instant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn record_safety_check_in(&self) -> Result<DateTime<Utc>> {
        let now = Utc::now();
        self.write(KEY_LAST_SAFETY_CHECK_IN, &now.to_rfc3339())?;
        Ok(now)
    }

    /// Returns the most recent safety check-in, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn last_safety_check_in(&self) -> Result<Option<DateTime<Utc>>> {
        let value = self.read(KEY_LAST_SAFETY_CHECK_IN)?;
        Ok(value
            .and_then(|text| DateTime::parse_from_rfc3339(&text).ok())
            .map(|stamp| stamp.with_timezone(&Utc)))
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            r"
            INSERT INTO preferences (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
            params![key, value],
        )?;
        Ok(())
    }

    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| PreferencesError::Storage(format!("Failed to acquire database lock: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_mode_defaults_to_off() {
        let prefs = Preferences::in_memory().unwrap();
        assert!(!prefs.is_dark_mode());
    }

    #[test]
    fn set_dark_mode_updates_cache() {
        let prefs = Preferences::in_memory().unwrap();
        prefs.set_dark_mode(true).unwrap();
        assert!(prefs.is_dark_mode());
        prefs.set_dark_mode(false).unwrap();
        assert!(!prefs.is_dark_mode());
    }

    #[test]
    fn toggle_dark_mode_flips() {
        let prefs = Preferences::in_memory().unwrap();
        assert!(prefs.toggle_dark_mode().unwrap());
        assert!(!prefs.toggle_dark_mode().unwrap());
    }

    #[test]
    fn check_in_roundtrips() {
        let prefs = Preferences::in_memory().unwrap();
        assert!(prefs.last_safety_check_in().unwrap().is_none());

        let recorded = prefs.record_safety_check_in().unwrap();
        let loaded = prefs.last_safety_check_in().unwrap().unwrap();

        // RFC 3339 keeps sub-second precision, so the roundtrip is exact.
        assert_eq!(recorded, loaded);
    }

    #[test]
    fn malformed_check_in_reads_as_none() {
        let prefs = Preferences::in_memory().unwrap();
        prefs.write(KEY_LAST_SAFETY_CHECK_IN, "yesterday").unwrap();
        assert!(prefs.last_safety_check_in().unwrap().is_none());
    }

    #[test]
    fn dark_mode_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");

        {
            let prefs = Preferences::new(&path).unwrap();
            prefs.set_dark_mode(true).unwrap();
        }

        let reopened = Preferences::new(&path).unwrap();
        assert!(reopened.is_dark_mode());
    }
}
