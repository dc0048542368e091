//! Environmental signal seam.
//!
//! The engine acquires every networked signal through the
//! [`EnvironmentSources`] trait so the HTTP implementation can be swapped
//! for stubs in tests. Each method maps to exactly one signal and is
//! retried never: a failure is logged by the engine and replaced with the
//! signal's documented default.

use std::future::Future;

use super::error::SignalResult;
use super::types::WeatherCondition;
use crate::location::Coordinates;

/// Crime impact used when geolocation, geocoding, or the dataset lookup
/// fails.
pub const DEFAULT_CRIME_IMPACT: u8 = 0;

/// Fixed radius for the point-of-interest crowd-density proxy.
pub const POI_RADIUS_METERS: u32 = 500;

/// Independently-sourced environmental lookups feeding the score.
pub trait EnvironmentSources {
    /// Resolves a coordinate to a region name via reverse geocoding.
    ///
    /// The region name is used only as the key into the crime dataset.
    ///
    /// # Errors
    ///
    /// Returns a [`SignalError`](super::SignalError) when the lookup
    /// fails or yields no usable region.
    fn region_name(
        &self,
        position: Coordinates,
    ) -> impl Future<Output = SignalResult<String>> + Send;

    /// Looks up the weather condition at a coordinate.
    ///
    /// # Errors
    ///
    /// Returns a [`SignalError`](super::SignalError) when the lookup
    /// fails.
    fn weather(
        &self,
        position: Coordinates,
    ) -> impl Future<Output = SignalResult<WeatherCondition>> + Send;

    /// Counts points of interest within `radius_m` meters of a
    /// coordinate.
    ///
    /// # Errors
    ///
    /// Returns a [`SignalError`](super::SignalError) when the lookup
    /// fails.
    fn poi_count(
        &self,
        position: Coordinates,
        radius_m: u32,
    ) -> impl Future<Output = SignalResult<u32>> + Send;

    /// Looks up the crime-impact figure for a region name.
    ///
    /// # Errors
    ///
    /// Returns a [`SignalError`](super::SignalError) when the dataset is
    /// unreachable or has no figure for the region.
    fn crime_impact(&self, region: &str) -> impl Future<Output = SignalResult<u8>> + Send;
}
