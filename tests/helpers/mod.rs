//! Reusable test helpers for safety-score integration tests.
//!
//! Stub implementations of the engine's two seams: the device
//! geolocation source and the environmental lookups. Each stub field is
//! independently switchable between success and failure so tests can
//! exercise the per-signal degradation matrix.

// Different test binaries use different subsets of these helpers.
#![allow(dead_code)]

use aegis_core::location::{Coordinates, GeolocationError, LocationSource};
use aegis_core::score::{SignalError, SignalResult, WeatherCondition};

/// A fixed position used across the score tests.
pub const TEST_POSITION: Coordinates = Coordinates {
    latitude: 37.7749,
    longitude: -122.4194,
};

/// Geolocation stub: yields the fixed test position or a chosen error.
pub struct StubLocation {
    pub result: Result<Coordinates, GeolocationError>,
}

impl StubLocation {
    /// A stub that finds the test position.
    pub fn found() -> Self {
        Self {
            result: Ok(TEST_POSITION),
        }
    }

    /// A stub that fails with the given error.
    pub fn failing(error: GeolocationError) -> Self {
        Self { result: Err(error) }
    }
}

impl LocationSource for StubLocation {
    async fn current_location(&self) -> Result<Coordinates, GeolocationError> {
        self.result.clone()
    }
}

/// Geolocation stub whose future never resolves.
///
/// Used to verify that cancelling a view scope abandons an acquisition
/// that would otherwise hang forever.
pub struct NeverLocation;

impl LocationSource for NeverLocation {
    async fn current_location(&self) -> Result<Coordinates, GeolocationError> {
        std::future::pending().await
    }
}

/// Environmental stub: each signal is `Some(value)` or `None` for a
/// simulated acquisition failure.
pub struct StubEnvironment {
    pub region: Option<String>,
    pub weather: Option<WeatherCondition>,
    pub poi_count: Option<u32>,
    pub crime_impact: Option<u8>,
}

impl StubEnvironment {
    /// A stub where every lookup succeeds with the given values.
    pub fn all_ok(
        region: &str,
        weather: WeatherCondition,
        poi_count: u32,
        crime_impact: u8,
    ) -> Self {
        Self {
            region: Some(region.to_string()),
            weather: Some(weather),
            poi_count: Some(poi_count),
            crime_impact: Some(crime_impact),
        }
    }

    /// A stub where every lookup fails.
    pub const fn all_failing() -> Self {
        Self {
            region: None,
            weather: None,
            poi_count: None,
            crime_impact: None,
        }
    }
}

fn fail(signal: &str) -> SignalError {
    SignalError::UnexpectedPayload(format!("stubbed {signal} failure"))
}

impl aegis_core::score::EnvironmentSources for StubEnvironment {
    async fn region_name(&self, _position: Coordinates) -> SignalResult<String> {
        self.region.clone().ok_or_else(|| fail("region"))
    }

    async fn weather(&self, _position: Coordinates) -> SignalResult<WeatherCondition> {
        self.weather.ok_or_else(|| fail("weather"))
    }

    async fn poi_count(&self, _position: Coordinates, _radius_m: u32) -> SignalResult<u32> {
        self.poi_count.ok_or_else(|| fail("poi"))
    }

    async fn crime_impact(&self, _region: &str) -> SignalResult<u8> {
        self.crime_impact.ok_or_else(|| fail("crime"))
    }
}

/// Geolocation stub that succeeds once, then never resolves again.
///
/// Lets a test complete one evaluation and then hang a second one to
/// exercise cancellation with a previous score on record.
pub struct OnceThenNeverLocation {
    used: std::sync::atomic::AtomicBool,
}

impl OnceThenNeverLocation {
    pub const fn new() -> Self {
        Self {
            used: std::sync::atomic::AtomicBool::new(false),
        }
    }
}

impl LocationSource for OnceThenNeverLocation {
    async fn current_location(&self) -> Result<Coordinates, GeolocationError> {
        if self.used.swap(true, std::sync::atomic::Ordering::SeqCst) {
            std::future::pending().await
        } else {
            Ok(TEST_POSITION)
        }
    }
}
