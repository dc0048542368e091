//! HTTP-backed environmental sources.
//!
//! One lookup per signal, each against its own service:
//!
//! - reverse geocoding: Nominatim-style `/reverse` endpoint
//! - weather: Open-Meteo-style `/v1/forecast` endpoint
//! - crowd proxy: Overpass-style count query around the coordinate
//! - crime impact: the Aegis backend's crime-data pass-through
//!
//! Endpoint bases are configurable through the environment so
//! deployments can point at mirrors or self-hosted instances. No API
//! keys are baked in; all default services are keyless.

use std::env;

use serde::Deserialize;
use tracing::info;

use super::error::{SignalError, SignalResult};
use super::sources::EnvironmentSources;
use super::types::{CrimeDataset, WeatherCondition};
use crate::location::Coordinates;

/// Base URLs for the signal services.
#[derive(Debug, Clone)]
pub struct SignalEndpoints {
    /// Reverse-geocoding service base (Nominatim-compatible).
    pub geocoder_base: String,
    /// Weather service base (Open-Meteo-compatible).
    pub weather_base: String,
    /// Points-of-interest service base (Overpass-compatible).
    pub poi_base: String,
    /// Aegis backend base (serves the crime-data dataset).
    pub backend_base: String,
}

impl SignalEndpoints {
    /// Loads endpoint bases from the environment, falling back to the
    /// defaults for any variable that is not set.
    ///
    /// Variables: `AEGIS_GEOCODER_URL`, `AEGIS_WEATHER_URL`,
    /// `AEGIS_POI_URL`, `AEGIS_BACKEND_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            geocoder_base: load_base("AEGIS_GEOCODER_URL", defaults.geocoder_base),
            weather_base: load_base("AEGIS_WEATHER_URL", defaults.weather_base),
            poi_base: load_base("AEGIS_POI_URL", defaults.poi_base),
            backend_base: load_base("AEGIS_BACKEND_URL", defaults.backend_base),
        }
    }
}

impl Default for SignalEndpoints {
    fn default() -> Self {
        Self {
            geocoder_base: "https://nominatim.openstreetmap.org".to_string(),
            weather_base: "https://api.open-meteo.com".to_string(),
            poi_base: "https://overpass-api.de".to_string(),
            backend_base: "http://localhost:5000".to_string(),
        }
    }
}

fn load_base(key: &str, default: String) -> String {
    env::var(key).map_or_else(
        |_| {
            info!("{key} not set, using default: {default}");
            default
        },
        |value| value.trim_end_matches('/').to_string(),
    )
}

/// Maps a WMO weather interpretation code to a scoring condition.
///
/// Thunderstorm codes become [`WeatherCondition::Storm`], drizzle, rain,
/// and shower codes become [`WeatherCondition::Rain`], and everything
/// else collapses to [`WeatherCondition::Sunny`], the same direction the
/// fallback takes.
#[must_use]
pub const fn weather_from_wmo_code(code: u16) -> WeatherCondition {
    match code {
        95..=99 => WeatherCondition::Storm,
        51..=67 | 80..=82 => WeatherCondition::Rain,
        _ => WeatherCondition::Sunny,
    }
}

#[derive(Deserialize)]
struct ReverseGeocodeResponse {
    address: Option<GeocodedAddress>,
}

#[derive(Deserialize)]
struct GeocodedAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    county: Option<String>,
    state: Option<String>,
}

impl GeocodedAddress {
    /// Most specific populated region name.
    fn region(self) -> Option<String> {
        self.city
            .or(self.town)
            .or(self.village)
            .or(self.county)
            .or(self.state)
    }
}

#[derive(Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Deserialize)]
struct CurrentWeather {
    weathercode: u16,
}

#[derive(Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Deserialize)]
struct OverpassElement {
    tags: Option<OverpassTags>,
}

#[derive(Deserialize)]
struct OverpassTags {
    total: Option<String>,
}

/// [`EnvironmentSources`] implementation over HTTP.
///
/// Shares one connection pool across all lookups. Each method performs a
/// single request with no retry; the engine owns the fallback policy.
#[derive(Debug, Clone)]
pub struct HttpEnvironmentSources {
    http: reqwest::Client,
    endpoints: SignalEndpoints,
}

impl HttpEnvironmentSources {
    /// Creates a source set over a fresh HTTP client.
    #[must_use]
    pub fn new(endpoints: SignalEndpoints) -> Self {
        Self::with_client(reqwest::Client::new(), endpoints)
    }

    /// Creates a source set over an existing HTTP client.
    #[must_use]
    pub const fn with_client(http: reqwest::Client, endpoints: SignalEndpoints) -> Self {
        Self { http, endpoints }
    }
}

impl EnvironmentSources for HttpEnvironmentSources {
    async fn region_name(&self, position: Coordinates) -> SignalResult<String> {
        let url = format!("{}/reverse", self.endpoints.geocoder_base);
        let response: ReverseGeocodeResponse = self
            .http
            .get(&url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", position.latitude.to_string()),
                ("lon", position.longitude.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .address
            .and_then(GeocodedAddress::region)
            .ok_or_else(|| {
                SignalError::UnexpectedPayload(
                    "reverse geocoding response carries no region name".to_string(),
                )
            })
    }

    async fn weather(&self, position: Coordinates) -> SignalResult<WeatherCondition> {
        let url = format!("{}/v1/forecast", self.endpoints.weather_base);
        let response: ForecastResponse = self
            .http
            .get(&url)
            .query(&[
                ("latitude", position.latitude.to_string()),
                ("longitude", position.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .current_weather
            .map(|current| weather_from_wmo_code(current.weathercode))
            .ok_or_else(|| {
                SignalError::UnexpectedPayload(
                    "forecast response carries no current weather".to_string(),
                )
            })
    }

    async fn poi_count(&self, position: Coordinates, radius_m: u32) -> SignalResult<u32> {
        let url = format!("{}/api/interpreter", self.endpoints.poi_base);
        let query = format!(
            "[out:json];node(around:{},{},{});out count;",
            radius_m, position.latitude, position.longitude
        );
        let response: OverpassResponse = self
            .http
            .get(&url)
            .query(&[("data", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let total = response
            .elements
            .into_iter()
            .find_map(|element| element.tags.and_then(|tags| tags.total))
            .ok_or_else(|| {
                SignalError::UnexpectedPayload("count response carries no total".to_string())
            })?;

        total.parse().map_err(|_| {
            SignalError::UnexpectedPayload(format!("count total is not a number: {total}"))
        })
    }

    async fn crime_impact(&self, region: &str) -> SignalResult<u8> {
        let url = format!("{}/api/auth/crime-data", self.endpoints.backend_base);
        let dataset: CrimeDataset = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        dataset
            .impact_for(region)
            .ok_or_else(|| SignalError::RegionUnknown(region.to_string()))
    }
}
