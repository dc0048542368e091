//! High-level contact book API.
//!
//! The [`ContactBook`] merges the built-in emergency numbers with the
//! user's stored contacts and enforces the mutability rules: built-ins
//! are read-only, custom contacts support the full edit surface.

use std::path::Path;

use chrono::{Local, Utc};

use super::error::{ContactError, Result};
use super::storage::ContactStorage;
use super::types::{built_in_contacts, Contact, ContactFilter, ContactOrigin};

/// High-level API for emergency contacts.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use aegis_core::contacts::{Contact, ContactBook, ContactFilter};
///
/// let book = ContactBook::new(Path::new("/data/aegis/contacts.db"))?;
/// let saved = book.add(Contact::new_custom("Asha", "5550123"))?;
/// let listing = book.list(ContactFilter::All, "")?;
/// ```
pub struct ContactBook {
    storage: ContactStorage,
}

impl ContactBook {
    /// Opens (or creates) the contact book at the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or initialized.
    pub fn new(db_path: &Path) -> Result<Self> {
        Ok(Self {
            storage: ContactStorage::new(db_path)?,
        })
    }

    /// Creates an in-memory contact book for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            storage: ContactStorage::in_memory()?,
        })
    }

    /// The fixed built-in emergency numbers.
    #[must_use]
    pub fn built_ins(&self) -> Vec<Contact> {
        built_in_contacts()
    }

    /// Adds a custom contact and returns it with its assigned id.
    ///
    /// Name and number are required. The last-contacted date is stamped
    /// with today's date, matching how a freshly added contact is
    /// presented.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::InvalidData`] for a blank name or number,
    /// [`ContactError::BuiltInImmutable`] if the contact is tagged
    /// built-in, or a storage error.
    pub fn add(&self, contact: Contact) -> Result<Contact> {
        ensure_custom(&contact)?;
        validate(&contact)?;

        let now = Utc::now().timestamp();
        let mut contact = contact;
        contact.last_contacted = Some(Local::now().date_naive());
        contact.created_at = now;
        contact.updated_at = now;

        let id = self.storage.insert(&contact)?;
        contact.id = Some(id);
        Ok(contact)
    }

    /// Updates a stored custom contact in place.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::BuiltInImmutable`] for built-ins,
    /// [`ContactError::InvalidData`] for a blank name or number or a
    /// missing id, [`ContactError::NotFound`] if the id has no row, or a
    /// storage error.
    pub fn update(&self, contact: &Contact) -> Result<()> {
        ensure_custom(contact)?;
        validate(contact)?;
        let id = contact
            .id
            .ok_or_else(|| ContactError::InvalidData("contact has no id".to_string()))?;

        let mut changed = contact.clone();
        changed.updated_at = Utc::now().timestamp();
        self.storage.update(id, &changed)
    }

    /// Deletes a stored custom contact.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::NotFound`] if the id has no row, or a
    /// storage error.
    pub fn delete(&self, id: i64) -> Result<()> {
        self.storage.delete(id)
    }

    /// Flips the favorite flag of a custom contact and returns the new
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::NotFound`] if the id has no row, or a
    /// storage error.
    pub fn toggle_favorite(&self, id: i64) -> Result<bool> {
        self.toggle(id, |contact| {
            contact.is_favorite = !contact.is_favorite;
            contact.is_favorite
        })
    }

    /// Flips the important flag of a custom contact and returns the new
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::NotFound`] if the id has no row, or a
    /// storage error.
    pub fn toggle_important(&self, id: i64) -> Result<bool> {
        self.toggle(id, |contact| {
            contact.is_important = !contact.is_important;
            contact.is_important
        })
    }

    /// Records that the contact was reached today.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::NotFound`] if the id has no row, or a
    /// storage error.
    pub fn record_contacted(&self, id: i64) -> Result<()> {
        let mut contact = self
            .storage
            .get(id)?
            .ok_or(ContactError::NotFound(id))?;
        contact.last_contacted = Some(Local::now().date_naive());
        contact.updated_at = Utc::now().timestamp();
        self.storage.update(id, &contact)
    }

    /// Lists contacts matching the filter and search query.
    ///
    /// Built-ins always come first, then custom contacts in insertion
    /// order. The filter and query apply to both kinds; built-ins carry
    /// no flags, so the favorite and important filters exclude them.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list(&self, filter: ContactFilter, query: &str) -> Result<Vec<Contact>> {
        let mut merged = built_in_contacts();
        merged.extend(self.storage.get_all()?);
        merged.retain(|contact| filter.allows(contact) && contact.matches_query(query));
        Ok(merged)
    }

    fn toggle(&self, id: i64, flip: impl FnOnce(&mut Contact) -> bool) -> Result<bool> {
        let mut contact = self
            .storage
            .get(id)?
            .ok_or(ContactError::NotFound(id))?;
        let value = flip(&mut contact);
        contact.updated_at = Utc::now().timestamp();
        self.storage.update(id, &contact)?;
        Ok(value)
    }
}

fn ensure_custom(contact: &Contact) -> Result<()> {
    if contact.origin == ContactOrigin::BuiltIn {
        return Err(ContactError::BuiltInImmutable);
    }
    Ok(())
}

fn validate(contact: &Contact) -> Result<()> {
    if contact.name.trim().is_empty() {
        return Err(ContactError::InvalidData("name is required".to_string()));
    }
    if contact.number.trim().is_empty() {
        return Err(ContactError::InvalidData("number is required".to_string()));
    }
    Ok(())
}
