//! Core types for safety scoring.
//!
//! This module defines the environmental signal enums, the assembled
//! [`SafetySignal`], and the derived [`SafetyScore`]. A score is never
//! persisted; it is recomputed from a fresh signal on every evaluation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Weather condition at the user's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    /// Clear or unremarkable weather. Also the fallback when the weather
    /// lookup fails.
    #[default]
    Sunny,
    /// Rain or drizzle.
    Rain,
    /// Thunderstorm conditions.
    Storm,
}

impl WeatherCondition {
    /// Converts to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Rain => "rain",
            Self::Storm => "storm",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sunny" => Some(Self::Sunny),
            "rain" => Some(Self::Rain),
            "storm" => Some(Self::Storm),
            _ => None,
        }
    }
}

/// Crowd density around the user's position, proxied by the number of
/// points of interest within a fixed radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CrowdDensity {
    /// Fewer than 5 points of interest nearby.
    Low,
    /// 5 to 19 points of interest nearby. Also the fallback when the
    /// lookup fails.
    #[default]
    Medium,
    /// 20 or more points of interest nearby.
    High,
}

impl CrowdDensity {
    /// Buckets a point-of-interest count into a density level.
    ///
    /// # Examples
    ///
    /// ```
    /// use aegis_core::score::CrowdDensity;
    ///
    /// assert_eq!(CrowdDensity::from_poi_count(0), CrowdDensity::Low);
    /// assert_eq!(CrowdDensity::from_poi_count(5), CrowdDensity::Medium);
    /// assert_eq!(CrowdDensity::from_poi_count(20), CrowdDensity::High);
    /// ```
    #[must_use]
    pub const fn from_poi_count(count: u32) -> Self {
        if count < 5 {
            Self::Low
        } else if count < 20 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Converts to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Lighting condition at the user's position.
///
/// Lighting has no independent source. It is derived deterministically
/// from daytime and weather via [`LightingCondition::derive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightingCondition {
    /// Daytime with clear weather.
    Good,
    /// Daytime with rain or storm overhead.
    Moderate,
    /// Nighttime.
    Poor,
}

impl LightingCondition {
    /// Derives the lighting condition from daytime and weather.
    ///
    /// # Examples
    ///
    /// ```
    /// use aegis_core::score::{LightingCondition, WeatherCondition};
    ///
    /// let lighting = LightingCondition::derive(true, WeatherCondition::Sunny);
    /// assert_eq!(lighting, LightingCondition::Good);
    ///
    /// let night = LightingCondition::derive(false, WeatherCondition::Sunny);
    /// assert_eq!(night, LightingCondition::Poor);
    /// ```
    #[must_use]
    pub const fn derive(is_daytime: bool, weather: WeatherCondition) -> Self {
        if !is_daytime {
            Self::Poor
        } else if matches!(weather, WeatherCondition::Sunny) {
            Self::Good
        } else {
            Self::Moderate
        }
    }

    /// Converts to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }
}

/// Categorical safety level derived from a score value.
///
/// Tier boundaries are inclusive at the lower bound: a score of exactly
/// 80 is `VerySafe`, exactly 60 is `Safe`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SafetyLevel {
    /// Score below 20.
    VeryRisky,
    /// Score 20 to 39.
    Risky,
    /// Score 40 to 59.
    Moderate,
    /// Score 60 to 79.
    Safe,
    /// Score 80 and above.
    VerySafe,
}

impl SafetyLevel {
    /// Maps a clamped score value to its level.
    #[must_use]
    pub const fn from_score(value: u8) -> Self {
        if value >= 80 {
            Self::VerySafe
        } else if value >= 60 {
            Self::Safe
        } else if value >= 40 {
            Self::Moderate
        } else if value >= 20 {
            Self::Risky
        } else {
            Self::VeryRisky
        }
    }

    /// User-facing label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VeryRisky => "Very Risky",
            Self::Risky => "Risky",
            Self::Moderate => "Moderate",
            Self::Safe => "Safe",
            Self::VerySafe => "Very Safe",
        }
    }
}

/// The environmental inputs of one scoring evaluation.
///
/// Ephemeral: assembled fresh for every evaluation, each field from its
/// own source with its own fallback. See the engine for the acquisition
/// and fallback rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySignal {
    /// Crime impact figure for the current region, 0 to 100.
    pub crime_impact: u8,
    /// Weather condition at the current position.
    pub weather: WeatherCondition,
    /// Crowd density around the current position.
    pub crowd: CrowdDensity,
    /// Lighting condition, derived from daytime and weather.
    pub lighting: LightingCondition,
    /// Whether the local clock hour falls in [6, 18).
    pub is_daytime: bool,
}

/// A computed safety score.
///
/// Derived from a [`SafetySignal`] by a pure function; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyScore {
    /// Score value, always within [0, 100].
    pub value: u8,
    /// Categorical label for the value.
    pub level: SafetyLevel,
}

/// Reference dataset mapping region names to crime-impact figures.
///
/// Served by the backend's crime-data endpoint as a static pass-through.
/// Lookups are case-insensitive on the region name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrimeDataset(HashMap<String, u8>);

impl CrimeDataset {
    /// Creates a dataset from region/impact pairs.
    #[must_use]
    pub fn new(entries: HashMap<String, u8>) -> Self {
        Self(entries)
    }

    /// Looks up the crime-impact figure for a region, case-insensitively.
    ///
    /// Values are clamped to 100 so a malformed dataset entry cannot
    /// push the score formula out of range.
    #[must_use]
    pub fn impact_for(&self, region: &str) -> Option<u8> {
        self.0
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(region))
            .map(|(_, impact)| (*impact).min(100))
    }

    /// Returns the number of regions in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_default_is_sunny() {
        assert_eq!(WeatherCondition::default(), WeatherCondition::Sunny);
    }

    #[test]
    fn weather_as_str_parse_roundtrip() {
        for weather in [
            WeatherCondition::Sunny,
            WeatherCondition::Rain,
            WeatherCondition::Storm,
        ] {
            assert_eq!(WeatherCondition::parse(weather.as_str()), Some(weather));
        }
        assert_eq!(WeatherCondition::parse("hail"), None);
    }

    #[test]
    fn crowd_default_is_medium() {
        assert_eq!(CrowdDensity::default(), CrowdDensity::Medium);
    }

    #[test]
    fn crowd_bucket_boundaries() {
        assert_eq!(CrowdDensity::from_poi_count(0), CrowdDensity::Low);
        assert_eq!(CrowdDensity::from_poi_count(4), CrowdDensity::Low);
        assert_eq!(CrowdDensity::from_poi_count(5), CrowdDensity::Medium);
        assert_eq!(CrowdDensity::from_poi_count(19), CrowdDensity::Medium);
        assert_eq!(CrowdDensity::from_poi_count(20), CrowdDensity::High);
        assert_eq!(CrowdDensity::from_poi_count(500), CrowdDensity::High);
    }

    #[test]
    fn crowd_as_str_parse_roundtrip() {
        for crowd in [CrowdDensity::Low, CrowdDensity::Medium, CrowdDensity::High] {
            assert_eq!(CrowdDensity::parse(crowd.as_str()), Some(crowd));
        }
        assert_eq!(CrowdDensity::parse("packed"), None);
    }

    #[test]
    fn lighting_good_only_when_daytime_and_sunny() {
        assert_eq!(
            LightingCondition::derive(true, WeatherCondition::Sunny),
            LightingCondition::Good
        );
        assert_eq!(
            LightingCondition::derive(true, WeatherCondition::Rain),
            LightingCondition::Moderate
        );
        assert_eq!(
            LightingCondition::derive(true, WeatherCondition::Storm),
            LightingCondition::Moderate
        );
    }

    #[test]
    fn lighting_poor_at_night_regardless_of_weather() {
        for weather in [
            WeatherCondition::Sunny,
            WeatherCondition::Rain,
            WeatherCondition::Storm,
        ] {
            assert_eq!(
                LightingCondition::derive(false, weather),
                LightingCondition::Poor
            );
        }
    }

    #[test]
    fn level_tier_lower_bounds_are_inclusive() {
        assert_eq!(SafetyLevel::from_score(100), SafetyLevel::VerySafe);
        assert_eq!(SafetyLevel::from_score(80), SafetyLevel::VerySafe);
        assert_eq!(SafetyLevel::from_score(79), SafetyLevel::Safe);
        assert_eq!(SafetyLevel::from_score(60), SafetyLevel::Safe);
        assert_eq!(SafetyLevel::from_score(59), SafetyLevel::Moderate);
        assert_eq!(SafetyLevel::from_score(40), SafetyLevel::Moderate);
        assert_eq!(SafetyLevel::from_score(39), SafetyLevel::Risky);
        assert_eq!(SafetyLevel::from_score(20), SafetyLevel::Risky);
        assert_eq!(SafetyLevel::from_score(19), SafetyLevel::VeryRisky);
        assert_eq!(SafetyLevel::from_score(0), SafetyLevel::VeryRisky);
    }

    #[test]
    fn level_labels() {
        assert_eq!(SafetyLevel::VerySafe.as_str(), "Very Safe");
        assert_eq!(SafetyLevel::VeryRisky.as_str(), "Very Risky");
    }

    #[test]
    fn level_ordering_matches_severity() {
        assert!(SafetyLevel::VeryRisky < SafetyLevel::Risky);
        assert!(SafetyLevel::Risky < SafetyLevel::Moderate);
        assert!(SafetyLevel::Moderate < SafetyLevel::Safe);
        assert!(SafetyLevel::Safe < SafetyLevel::VerySafe);
    }

    #[test]
    fn crime_dataset_lookup_is_case_insensitive() {
        let mut entries = HashMap::new();
        entries.insert("Springfield".to_string(), 30);
        let dataset = CrimeDataset::new(entries);

        assert_eq!(dataset.impact_for("springfield"), Some(30));
        assert_eq!(dataset.impact_for("SPRINGFIELD"), Some(30));
        assert_eq!(dataset.impact_for("Shelbyville"), None);
    }

    #[test]
    fn crime_dataset_clamps_malformed_entries() {
        let mut entries = HashMap::new();
        entries.insert("Gotham".to_string(), 250);
        let dataset = CrimeDataset::new(entries);

        assert_eq!(dataset.impact_for("Gotham"), Some(100));
    }

    #[test]
    fn crime_dataset_roundtrip_json() {
        let json = r#"{"Springfield":30,"Shelbyville":55}"#;
        let dataset: CrimeDataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.impact_for("shelbyville"), Some(55));
    }
}
