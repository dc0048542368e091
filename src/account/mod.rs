//! Backend account surface.
//!
//! The backend persists one document per user: identity, hashed
//! credentials, emergency contacts, last-known location, and a profile
//! picture. This module is the typed client for that surface plus the
//! wire types it speaks.
//!
//! All routes live under a single authorization-consistent `/api/auth`
//! prefix; record mutations require the bearer token issued at login.
//!
//! # Error surfacing
//!
//! Backend rejections (bad credentials, duplicate email) carry a
//! human-readable message that is surfaced verbatim to the user, while
//! transport failures stay distinct so the UI can phrase them
//! differently.

mod client;
mod error;
pub mod types;

pub use client::AccountClient;
pub use error::{AccountError, Result};
pub use types::{
    ApiMessage, EmergencyContact, GeoPoint, LocationUpdate, LoginRequest, Password, Session,
    SignupRequest, UserProfile, UserSummary,
};
