//! Location module for Aegis.
//!
//! Provides the coordinate types and seams the rest of the crate builds on:
//! - Validated latitude/longitude pairs (invalid input falls back to 0.0)
//! - A share link for sending the current position to trusted contacts
//! - The [`LocationSource`] trait abstracting the device geolocation facility
//! - A typed error taxonomy for geolocation failures
//!
//! # Example Usage
//!
//! ```
//! use aegis_core::location::{maps_share_url, Coordinates};
//!
//! let position = Coordinates::new(37.7749, -122.4194);
//! let link = maps_share_url(position);
//! assert!(link.starts_with("https://www.google.com/maps?q="));
//! ```

pub mod error;
pub mod share;
pub mod source;
pub mod types;

pub use error::GeolocationError;
pub use share::maps_share_url;
pub use source::LocationSource;
pub use types::Coordinates;
