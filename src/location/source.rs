//! Device geolocation seam.

use std::future::Future;

use super::error::GeolocationError;
use super::types::Coordinates;

/// A source of the device's current position.
///
/// The concrete implementation lives on the platform side (browser
/// geolocation, mobile GPS). The safety-score engine and the SOS flow
/// depend only on this trait so tests can substitute a stub.
pub trait LocationSource {
    /// Returns the device's current position.
    ///
    /// # Errors
    ///
    /// Returns a [`GeolocationError`] distinguishing permission denial,
    /// unavailability, timeout, and unknown platform failures.
    fn current_location(
        &self,
    ) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send;
}
