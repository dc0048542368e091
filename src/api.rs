//! Application entry point over the locally-persisted state.

use std::path::Path;

use thiserror::Error;

use crate::contacts::{ContactBook, ContactError};
use crate::prefs::{Preferences, PreferencesError};

/// Error type for core initialization.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Filesystem failure preparing the data directory.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Contact storage failed to initialize.
    #[error(transparent)]
    Contacts(#[from] ContactError),

    /// Preference storage failed to initialize.
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}

/// Core interface for Aegis functionality.
///
/// Owns the device-local persisted state (contact book and preferences)
/// so the application has one source of truth, loaded once at startup.
/// Stateless collaborators (the score engine, the SOS controller, the
/// backend client) are constructed separately with their platform seams.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use aegis_core::AegisCore;
///
/// let core = AegisCore::new(Path::new("/data/aegis"))?;
/// let dark = core.preferences().is_dark_mode();
/// let listing = core.contacts().list(Default::default(), "")?;
/// ```
pub struct AegisCore {
    contacts: ContactBook,
    preferences: Preferences,
}

impl AegisCore {
    /// Opens (or creates) the local state under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or either database cannot be
    /// created.
    pub fn new(data_dir: &Path) -> Result<Self, CoreError> {
        std::fs::create_dir_all(data_dir)
            .map_err(|e| CoreError::Storage(format!("Failed to create data directory: {e}")))?;

        let contacts = ContactBook::new(&data_dir.join("contacts.db"))?;
        let preferences = Preferences::new(&data_dir.join("prefs.db"))?;

        Ok(Self {
            contacts,
            preferences,
        })
    }

    /// The device-local contact book.
    #[must_use]
    pub const fn contacts(&self) -> &ContactBook {
        &self.contacts
    }

    /// The device-local preference store.
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }
}
