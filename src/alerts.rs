//! Nearby incident reports and safety tips.
//!
//! The home screen shows a short feed of recent incidents around the
//! user's position. The feed degrades the same way the score signals do:
//! a failed fetch is logged and the user simply sees no alerts, never an
//! error.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::location::Coordinates;
use crate::score::SignalResult;

/// Safety tips shown on the home screen.
pub const SAFETY_TIPS: &[&str] = &[
    "Always share your live location with trusted contacts.",
    "Avoid walking alone in isolated areas at night.",
    "Keep your phone charged and emergency numbers saved.",
    "Trust your instincts and stay aware of your surroundings.",
];

/// How many incidents the feed shows by default.
pub const DEFAULT_FEED_LIMIT: usize = 10;

/// A recent incident near the user's position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IncidentAlert {
    /// Incident category (e.g. "Incident", "Warning").
    #[serde(alias = "incident_offense")]
    pub kind: String,
    /// Human-readable description.
    #[serde(alias = "incident_offense_description")]
    pub description: String,
    /// When the incident occurred, if the provider reports it.
    #[serde(default, alias = "incident_date")]
    pub occurred_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct IncidentFeedResponse {
    incidents: Vec<IncidentAlert>,
}

/// A provider of recent incident reports.
pub trait IncidentSource {
    /// Fetches up to `limit` recent incidents around a position.
    ///
    /// # Errors
    ///
    /// Returns a [`SignalError`] when the provider is unreachable or the
    /// payload cannot be decoded.
    fn recent_incidents(
        &self,
        position: Coordinates,
        limit: usize,
    ) -> impl Future<Output = SignalResult<Vec<IncidentAlert>>> + Send;
}

/// [`IncidentSource`] implementation over an HTTP incident provider.
#[derive(Debug, Clone)]
pub struct HttpIncidentSource {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpIncidentSource {
    /// Creates a source for the provider at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Attaches the provider's API key, sent as an `x-api-key` header.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl IncidentSource for HttpIncidentSource {
    async fn recent_incidents(
        &self,
        position: Coordinates,
        limit: usize,
    ) -> SignalResult<Vec<IncidentAlert>> {
        let url = format!("{}/v1/incidents/raw-data", self.base_url);
        let mut request = self.http.get(&url).query(&[
            ("lat", position.latitude.to_string()),
            ("lon", position.longitude.to_string()),
            ("limit", limit.to_string()),
        ]);
        if let Some(ref api_key) = self.api_key {
            request = request.header("x-api-key", api_key);
        }

        let response: IncidentFeedResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.incidents)
    }
}

/// Fetches the incident feed, degrading to an empty list on failure.
///
/// This is the call sites' entry point: the feed is decorative, so a
/// provider outage must never surface as an error.
pub async fn incident_feed<S: IncidentSource>(
    source: &S,
    position: Coordinates,
) -> Vec<IncidentAlert> {
    match source.recent_incidents(position, DEFAULT_FEED_LIMIT).await {
        Ok(incidents) => incidents,
        Err(error) => {
            warn!(%error, "incident feed unavailable, showing none");
            Vec::new()
        }
    }
}
