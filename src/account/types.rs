//! Wire types for the backend REST surface.
//!
//! These mirror the backend's user document: a single record per user
//! holding identity, hashed credentials (server-side only), emergency
//! contacts, a GeoJSON location, and a profile-picture path.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::location::Coordinates;

/// A password held in memory only as long as needed.
///
/// The backing string is wiped on drop and never appears in debug
/// output.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Wraps a password string.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Payload for `POST /api/auth/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Email address; unique on the backend.
    pub email: String,
    /// Phone number; unique on the backend.
    pub phone: String,
    /// Plaintext password; the backend hashes it before storing.
    pub password: Password,
}

/// Payload for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: Password,
}

/// Identity subset returned alongside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Backend record id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// A signed, time-limited session issued on login.
#[derive(Clone, Deserialize)]
pub struct Session {
    /// Bearer token for authenticated routes.
    pub token: String,
    /// The logged-in user.
    pub user: UserSummary,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// An emergency contact stored on the user's backend record.
///
/// Distinct from the device-local contact book: these are the numbers
/// the backend notifies on an SOS, synced across devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    /// Contact name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
}

/// GeoJSON point as the backend stores it: `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Always "Point".
    #[serde(rename = "type")]
    pub kind: String,
    /// Coordinates in GeoJSON order: longitude first.
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    /// Builds a point from device coordinates, swapping into GeoJSON
    /// order.
    #[must_use]
    pub fn from_coordinates(position: Coordinates) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [position.longitude, position.latitude],
        }
    }

    /// Latitude component.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    /// Longitude component.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates[0]
    }
}

/// A user record as returned by `GET /api/auth/profile/:id`.
///
/// The password hash never leaves the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    /// Backend record id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Emergency contacts synced to the backend.
    #[serde(rename = "emergencyContacts", default)]
    pub emergency_contacts: Vec<EmergencyContact>,
    /// Last reported location, if any.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Path of the uploaded profile picture, empty when unset.
    #[serde(rename = "profilePicture", default)]
    pub profile_picture: String,
}

/// Body for the location-update route.
#[derive(Debug, Clone, Serialize)]
pub struct LocationUpdate {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl From<Coordinates> for LocationUpdate {
    fn from(position: Coordinates) -> Self {
        Self {
            latitude: position.latitude,
            longitude: position.longitude,
        }
    }
}

/// Generic `{ "message": ... }` envelope the backend uses for both
/// confirmations and rejections.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    /// Human-readable message, surfaced verbatim.
    pub message: String,
}
