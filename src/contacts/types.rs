//! Core types for emergency-contact management.
//!
//! Contacts come in two kinds, distinguished by an explicit origin tag:
//! built-in emergency numbers that ship with the application and can
//! never be edited, and custom contacts the user manages. Merged
//! listings always place built-ins first, but nothing infers kind from
//! position; the tag is authoritative.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a contact record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContactOrigin {
    /// Fixed emergency number shipped with the application. Immutable.
    BuiltIn,
    /// User-created contact, editable and deletable.
    #[default]
    Custom,
}

impl ContactOrigin {
    /// Converts to string representation for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuiltIn => "built_in",
            Self::Custom => "custom",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "built_in" => Some(Self::BuiltIn),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Listing filter for the contact book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactFilter {
    /// Every contact.
    #[default]
    All,
    /// Only contacts marked favorite.
    Favorites,
    /// Only contacts marked important.
    Important,
}

impl ContactFilter {
    /// Returns whether a contact passes this filter.
    #[must_use]
    pub const fn allows(&self, contact: &Contact) -> bool {
        match self {
            Self::All => true,
            Self::Favorites => contact.is_favorite,
            Self::Important => contact.is_important,
        }
    }
}

/// An emergency contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Storage row id. `None` for built-ins and contacts not yet saved.
    pub id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Phone number, stored as entered.
    pub number: String,
    /// Optional free-form category (e.g. "Family").
    pub category: Option<String>,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Whether this is a built-in or a user-created contact.
    pub origin: ContactOrigin,
    /// Favorite flag. Always false on built-ins.
    pub is_favorite: bool,
    /// Important flag. Always false on built-ins.
    pub is_important: bool,
    /// Date the contact was last reached, if recorded.
    pub last_contacted: Option<NaiveDate>,
    /// When this contact was created (Unix timestamp). 0 for built-ins.
    pub created_at: i64,
    /// When this contact was last updated (Unix timestamp). 0 for built-ins.
    pub updated_at: i64,
}

impl Contact {
    /// Creates an unsaved custom contact.
    #[must_use]
    pub fn new_custom(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            number: number.into(),
            category: None,
            notes: None,
            origin: ContactOrigin::Custom,
            is_favorite: false,
            is_important: false,
            last_contacted: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns whether the contact matches a search query.
    ///
    /// Matches case-insensitively against the name, or as a substring of
    /// the number. An empty query matches everything.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query.to_lowercase()) || self.number.contains(query)
    }
}

struct BuiltInSpec {
    name: &'static str,
    number: &'static str,
    category: &'static str,
}

const BUILT_IN_SPECS: &[BuiltInSpec] = &[
    BuiltInSpec {
        name: "Police",
        number: "100",
        category: "Emergency",
    },
    BuiltInSpec {
        name: "Ambulance",
        number: "102",
        category: "Emergency",
    },
    BuiltInSpec {
        name: "Women Helpline",
        number: "1091",
        category: "Emergency",
    },
];

/// The fixed emergency numbers that are always present.
///
/// These occupy the first positions of every merged listing and cannot
/// be edited, deleted, or flagged.
#[must_use]
pub fn built_in_contacts() -> Vec<Contact> {
    BUILT_IN_SPECS
        .iter()
        .map(|spec| Contact {
            id: None,
            name: spec.name.to_string(),
            number: spec.number.to_string(),
            category: Some(spec.category.to_string()),
            notes: None,
            origin: ContactOrigin::BuiltIn,
            is_favorite: false,
            is_important: false,
            last_contacted: None,
            created_at: 0,
            updated_at: 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_default_is_custom() {
        assert_eq!(ContactOrigin::default(), ContactOrigin::Custom);
    }

    #[test]
    fn origin_as_str_parse_roundtrip() {
        for origin in [ContactOrigin::BuiltIn, ContactOrigin::Custom] {
            assert_eq!(ContactOrigin::parse(origin.as_str()), Some(origin));
        }
        assert_eq!(ContactOrigin::parse("imported"), None);
    }

    #[test]
    fn built_ins_are_fixed_and_tagged() {
        let built_ins = built_in_contacts();
        assert_eq!(built_ins.len(), 3);

        assert_eq!(built_ins[0].name, "Police");
        assert_eq!(built_ins[0].number, "100");
        assert_eq!(built_ins[1].name, "Ambulance");
        assert_eq!(built_ins[1].number, "102");
        assert_eq!(built_ins[2].name, "Women Helpline");
        assert_eq!(built_ins[2].number, "1091");

        for contact in &built_ins {
            assert_eq!(contact.origin, ContactOrigin::BuiltIn);
            assert!(contact.id.is_none());
            assert!(!contact.is_favorite);
            assert!(!contact.is_important);
        }
    }

    #[test]
    fn new_custom_builder() {
        let contact = Contact::new_custom("Asha", "5550123")
            .with_category("Family")
            .with_notes("Sister");

        assert_eq!(contact.origin, ContactOrigin::Custom);
        assert_eq!(contact.category, Some("Family".to_string()));
        assert_eq!(contact.notes, Some("Sister".to_string()));
        assert!(contact.id.is_none());
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let contact = Contact::new_custom("Asha Rao", "5550123");
        assert!(contact.matches_query("asha"));
        assert!(contact.matches_query("RAO"));
        assert!(!contact.matches_query("priya"));
    }

    #[test]
    fn query_matches_number_substring() {
        let contact = Contact::new_custom("Asha", "5550123");
        assert!(contact.matches_query("0123"));
        assert!(!contact.matches_query("9999"));
    }

    #[test]
    fn empty_query_matches_everything() {
        let contact = Contact::new_custom("Asha", "5550123");
        assert!(contact.matches_query(""));
    }

    #[test]
    fn filter_allows() {
        let mut contact = Contact::new_custom("Asha", "5550123");
        assert!(ContactFilter::All.allows(&contact));
        assert!(!ContactFilter::Favorites.allows(&contact));
        assert!(!ContactFilter::Important.allows(&contact));

        contact.is_favorite = true;
        assert!(ContactFilter::Favorites.allows(&contact));

        contact.is_important = true;
        assert!(ContactFilter::Important.allows(&contact));
    }
}
