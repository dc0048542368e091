//! `SQLite` storage for custom contacts.
//!
//! Only user-created contacts are stored; built-ins are compiled into
//! the binary and merged at listing time. All data lives locally on the
//! device and is never synced to the backend.

// SQLite operations need to hold the lock for the duration of the operation.
// Dropping the guard earlier would require restructuring all methods.
#![allow(clippy::significant_drop_tightening)]

use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::error::{ContactError, Result};
use super::types::{Contact, ContactOrigin};

/// `SQLite`-based storage for custom contacts.
///
/// Thread-safe wrapper around a `SQLite` connection. Rows keep their
/// insertion order, which is the order custom contacts appear in merged
/// listings.
pub struct ContactStorage {
    conn: Mutex<Connection>,
}

impl ContactStorage {
    /// Creates a new storage instance at the given path.
    ///
    /// Creates the database file and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or initialized.
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Creates an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Initializes the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ContactError::Storage(format!("Failed to acquire database lock: {e}")))?;

        conn.execute_batch(
            r"
            -- Custom contacts only. Built-ins are never stored.
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                number TEXT NOT NULL,
                category TEXT,
                notes TEXT,
                is_favorite INTEGER NOT NULL DEFAULT 0,
                is_important INTEGER NOT NULL DEFAULT 0,
                last_contacted TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );
            ",
        )?;

        Ok(())
    }

    /// Inserts a custom contact and returns its assigned row id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert(&self, contact: &Contact) -> Result<i64> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ContactError::Storage(format!("Failed to acquire database lock: {e}")))?;

        conn.execute(
            r"
            INSERT INTO contacts (name, number, category, notes, is_favorite, is_important, last_contacted, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
            params![
                &contact.name,
                &contact.number,
                &contact.category,
                &contact.notes,
                i64::from(contact.is_favorite),
                i64::from(contact.is_important),
                contact.last_contacted.map(|date| date.to_string()),
                contact.created_at,
                contact.updated_at,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Overwrites the stored contact with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::NotFound`] if no row has that id, or an
    /// error if the database operation fails.
    pub fn update(&self, id: i64, contact: &Contact) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ContactError::Storage(format!("Failed to acquire database lock: {e}")))?;

        let changed = conn.execute(
            r"
            UPDATE contacts
            SET name = ?2, number = ?3, category = ?4, notes = ?5,
                is_favorite = ?6, is_important = ?7, last_contacted = ?8, updated_at = ?9
            WHERE id = ?1
            ",
            params![
                id,
                &contact.name,
                &contact.number,
                &contact.category,
                &contact.notes,
                i64::from(contact.is_favorite),
                i64::from(contact.is_important),
                contact.last_contacted.map(|date| date.to_string()),
                contact.updated_at,
            ],
        )?;

        if changed == 0 {
            return Err(ContactError::NotFound(id));
        }
        Ok(())
    }

    /// Deletes the contact with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::NotFound`] if no row has that id, or an
    /// error if the database operation fails.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ContactError::Storage(format!("Failed to acquire database lock: {e}")))?;

        let changed = conn.execute("DELETE FROM contacts WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(ContactError::NotFound(id));
        }
        Ok(())
    }

    /// Retrieves a contact by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: i64) -> Result<Option<Contact>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ContactError::Storage(format!("Failed to acquire database lock: {e}")))?;

        let contact = conn
            .query_row(
                r"
                SELECT id, name, number, category, notes, is_favorite, is_important, last_contacted, created_at, updated_at
                FROM contacts
                WHERE id = ?1
                ",
                params![id],
                decode_row,
            )
            .optional()?;

        Ok(contact)
    }

    /// Retrieves all custom contacts in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_all(&self) -> Result<Vec<Contact>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ContactError::Storage(format!("Failed to acquire database lock: {e}")))?;

        let mut stmt = conn.prepare(
            r"
            SELECT id, name, number, category, notes, is_favorite, is_important, last_contacted, created_at, updated_at
            FROM contacts
            ORDER BY id ASC
            ",
        )?;

        let contacts = stmt
            .query_map([], decode_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(contacts)
    }
}

fn decode_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    let last_contacted: Option<String> = row.get(7)?;
    // A date that fails to parse is dropped rather than failing the
    // whole listing; the column is display-only metadata.
    let last_contacted =
        last_contacted.and_then(|text| NaiveDate::parse_from_str(&text, "%Y-%m-%d").ok());

    Ok(Contact {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        number: row.get(2)?,
        category: row.get(3)?,
        notes: row.get(4)?,
        origin: ContactOrigin::Custom,
        is_favorite: row.get::<_, i64>(5)? != 0,
        is_important: row.get::<_, i64>(6)? != 0,
        last_contacted,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
