//! Safety-score engine.
//!
//! Combines five environmental signals into a bounded 0-100 score with a
//! categorical label:
//!
//! - crime impact for the current region (reverse geocode + reference
//!   dataset)
//! - weather condition at the coordinate
//! - crowd density (point-of-interest count proxy)
//! - lighting condition (derived from daytime and weather)
//! - daytime (local clock)
//!
//! Every signal is acquired independently and fails independently: a
//! source that cannot deliver is logged and replaced with its documented
//! default, so an evaluation always terminates with a valid score. The
//! score is display-only; nothing else in the application depends on it.
//!
//! # Lifecycle
//!
//! `Idle → Acquiring → Ready`, re-entering `Acquiring` on each demand.
//! There is no background polling. Acquisitions can be tied to a
//! [`ViewScope`] so fetches in flight are abandoned when the requesting
//! view goes away.
//!
//! # Example
//!
//! ```
//! use aegis_core::score::{
//!     compute_score, CrowdDensity, LightingCondition, SafetySignal, WeatherCondition,
//! };
//!
//! let signal = SafetySignal {
//!     crime_impact: 30,
//!     weather: WeatherCondition::Rain,
//!     crowd: CrowdDensity::Low,
//!     lighting: LightingCondition::derive(false, WeatherCondition::Rain),
//!     is_daytime: false,
//! };
//! let score = compute_score(&signal);
//! assert!(score.value <= 100);
//! ```

pub mod engine;
pub mod error;
pub mod http;
pub mod scope;
pub mod sources;
pub mod types;

pub use engine::{compute_score, is_daytime_hour, is_daytime_now, EngineState, ScoreEngine};
pub use error::{SignalError, SignalResult};
pub use http::{weather_from_wmo_code, HttpEnvironmentSources, SignalEndpoints};
pub use scope::ViewScope;
pub use sources::{EnvironmentSources, DEFAULT_CRIME_IMPACT, POI_RADIUS_METERS};
pub use types::{
    CrimeDataset, CrowdDensity, LightingCondition, SafetyLevel, SafetyScore, SafetySignal,
    WeatherCondition,
};
