//! Error types for geolocation.

use thiserror::Error;

/// Errors reported by a device geolocation source.
///
/// Mirrors the failure modes a platform geolocation API distinguishes.
/// Unlike the environmental signals (which are silently defaulted),
/// geolocation failures carry a user-facing description because the UI
/// explains them to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The user denied the location permission request.
    #[error("Location permission was denied")]
    PermissionDenied,

    /// The device could not produce a position fix.
    #[error("Location information is unavailable")]
    Unavailable,

    /// No position fix arrived within the platform timeout.
    #[error("Timed out waiting for a location fix")]
    Timeout,

    /// Any other platform failure.
    #[error("Location error: {0}")]
    Unknown(String),
}
