//! Score computation and the acquisition lifecycle.
//!
//! The scoring function itself is pure and total: given a
//! [`SafetySignal`] it always produces a clamped [`SafetyScore`], raising
//! no errors. Everything fallible lives in acquisition, where each signal
//! fails independently into its documented default.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Local, Timelike};
use tracing::warn;

use super::scope::ViewScope;
use super::sources::{EnvironmentSources, DEFAULT_CRIME_IMPACT, POI_RADIUS_METERS};
use super::types::{
    CrowdDensity, LightingCondition, SafetyLevel, SafetyScore, SafetySignal, WeatherCondition,
};
use crate::location::{Coordinates, LocationSource};

/// Returns whether a local clock hour counts as daytime.
///
/// Daytime is the half-open range [6, 18).
#[must_use]
pub const fn is_daytime_hour(hour: u32) -> bool {
    hour >= 6 && hour < 18
}

/// Returns whether it is currently daytime on the device clock.
#[must_use]
pub fn is_daytime_now() -> bool {
    is_daytime_hour(Local::now().hour())
}

/// Computes a safety score from an assembled signal.
///
/// Pure and deterministic: identical inputs always yield identical
/// output, and the result is clamped to [0, 100] regardless of how far
/// the intermediate arithmetic swings.
///
/// # Examples
///
/// ```
/// use aegis_core::score::{
///     compute_score, CrowdDensity, LightingCondition, SafetyLevel, SafetySignal,
///     WeatherCondition,
/// };
///
/// let signal = SafetySignal {
///     crime_impact: 20,
///     weather: WeatherCondition::Rain,
///     crowd: CrowdDensity::Medium,
///     lighting: LightingCondition::Moderate,
///     is_daytime: true,
/// };
/// let score = compute_score(&signal);
/// assert_eq!(score.value, 60);
/// assert_eq!(score.level, SafetyLevel::Safe);
/// ```
#[must_use]
pub fn compute_score(signal: &SafetySignal) -> SafetyScore {
    let mut value = 100 - i32::from(signal.crime_impact);

    if !signal.is_daytime {
        value -= 20;
    }

    match signal.weather {
        WeatherCondition::Rain => value -= 10,
        WeatherCondition::Storm => value -= 20,
        WeatherCondition::Sunny => {}
    }

    match signal.crowd {
        CrowdDensity::Low => value -= 15,
        CrowdDensity::Medium => value -= 5,
        CrowdDensity::High => {}
    }

    match signal.lighting {
        LightingCondition::Poor => value -= 10,
        LightingCondition::Moderate => value -= 5,
        LightingCondition::Good => {}
    }

    // clamp guarantees the range, so the conversion cannot fail
    let value = u8::try_from(value.clamp(0, 100)).unwrap_or(0);

    SafetyScore {
        value,
        level: SafetyLevel::from_score(value),
    }
}

/// Acquisition lifecycle state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// No evaluation has run yet.
    #[default]
    Idle,
    /// Signal fetches are in flight.
    Acquiring,
    /// A score has been computed and is available via `last_score`.
    Ready,
}

#[derive(Default)]
struct EngineInner {
    state: EngineState,
    last_score: Option<SafetyScore>,
}

/// The safety-score engine.
///
/// Gathers one [`SafetySignal`] per evaluation from the device
/// geolocation facility and the environmental sources, then computes a
/// score. The engine never fails and never blocks other functionality:
/// every signal that cannot be acquired is logged and replaced with its
/// documented default.
///
/// There is no background polling. An evaluation runs once per demand
/// (typically view mount), moving the engine `Idle → Acquiring → Ready`;
/// a later demand re-enters `Acquiring`.
///
/// # Example
///
/// ```ignore
/// use aegis_core::score::{HttpEnvironmentSources, ScoreEngine, SignalEndpoints};
///
/// let engine = ScoreEngine::new(gps, HttpEnvironmentSources::new(SignalEndpoints::from_env()));
/// let score = engine.evaluate().await;
/// println!("{} ({})", score.value, score.level.as_str());
/// ```
pub struct ScoreEngine<L, E> {
    location: L,
    env: E,
    inner: Mutex<EngineInner>,
}

impl<L, E> ScoreEngine<L, E>
where
    L: LocationSource,
    E: EnvironmentSources,
{
    /// Creates an idle engine over the given signal sources.
    pub fn new(location: L, env: E) -> Self {
        Self {
            location,
            env,
            inner: Mutex::new(EngineInner::default()),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.lock_inner().state
    }

    /// The most recently computed score, if any evaluation has completed.
    pub fn last_score(&self) -> Option<SafetyScore> {
        self.lock_inner().last_score
    }

    /// Runs one full evaluation cycle and returns the score.
    ///
    /// Always terminates with a valid clamped score, whatever subset of
    /// signals could actually be acquired.
    pub async fn evaluate(&self) -> SafetyScore {
        self.set_state(EngineState::Acquiring);

        let signal = self.acquire_signal().await;
        let score = compute_score(&signal);

        let mut inner = self.lock_inner();
        inner.state = EngineState::Ready;
        inner.last_score = Some(score);
        drop(inner);

        score
    }

    /// Runs one evaluation cycle under a view-lifetime cancellation
    /// scope.
    ///
    /// Returns `None` if the scope is cancelled before the cycle
    /// completes. In-flight signal fetches are abandoned and the engine
    /// reverts to its previous state: `Ready` with the prior score if
    /// one exists, `Idle` otherwise. A cancelled cycle never overwrites
    /// `last_score`.
    pub async fn evaluate_scoped(&self, scope: &ViewScope) -> Option<SafetyScore> {
        if scope.is_cancelled() {
            return None;
        }

        self.set_state(EngineState::Acquiring);

        tokio::select! {
            signal = self.acquire_signal() => {
                let score = compute_score(&signal);
                let mut inner = self.lock_inner();
                inner.state = EngineState::Ready;
                inner.last_score = Some(score);
                drop(inner);
                Some(score)
            }
            () = scope.cancelled() => {
                let mut inner = self.lock_inner();
                inner.state = if inner.last_score.is_some() {
                    EngineState::Ready
                } else {
                    EngineState::Idle
                };
                drop(inner);
                None
            }
        }
    }

    /// Gathers one signal, substituting defaults for whatever fails.
    ///
    /// Geolocation is acquired first because three signals depend on the
    /// coordinate; the dependent lookups then run concurrently and are
    /// joined before scoring. Daytime comes from the local clock, checked
    /// once at the start of the cycle.
    async fn acquire_signal(&self) -> SafetySignal {
        let is_daytime = is_daytime_now();

        let position = match self.location.current_location().await {
            Ok(position) => Some(position),
            Err(error) => {
                warn!(%error, "geolocation failed, location-dependent signals fall back to defaults");
                None
            }
        };

        let (crime_impact, weather, crowd) = match position {
            Some(position) => {
                tokio::join!(
                    self.acquire_crime_impact(position),
                    self.acquire_weather(position),
                    self.acquire_crowd(position),
                )
            }
            None => (
                DEFAULT_CRIME_IMPACT,
                WeatherCondition::default(),
                CrowdDensity::default(),
            ),
        };

        let lighting = LightingCondition::derive(is_daytime, weather);

        SafetySignal {
            crime_impact,
            weather,
            crowd,
            lighting,
            is_daytime,
        }
    }

    async fn acquire_crime_impact(&self, position: Coordinates) -> u8 {
        let region = match self.env.region_name(position).await {
            Ok(region) => region,
            Err(error) => {
                warn!(%error, "reverse geocoding failed, crime impact falls back to 0");
                return DEFAULT_CRIME_IMPACT;
            }
        };

        match self.env.crime_impact(&region).await {
            Ok(impact) => impact.min(100),
            Err(error) => {
                warn!(region = %region, %error, "crime lookup failed, crime impact falls back to 0");
                DEFAULT_CRIME_IMPACT
            }
        }
    }

    async fn acquire_weather(&self, position: Coordinates) -> WeatherCondition {
        match self.env.weather(position).await {
            Ok(weather) => weather,
            Err(error) => {
                warn!(%error, "weather lookup failed, falling back to sunny");
                WeatherCondition::default()
            }
        }
    }

    async fn acquire_crowd(&self, position: Coordinates) -> CrowdDensity {
        match self.env.poi_count(position, POI_RADIUS_METERS).await {
            Ok(count) => CrowdDensity::from_poi_count(count),
            Err(error) => {
                warn!(%error, "crowd lookup failed, falling back to medium density");
                CrowdDensity::default()
            }
        }
    }

    fn set_state(&self, state: EngineState) {
        self.lock_inner().state = state;
    }

    fn lock_inner(&self) -> MutexGuard<'_, EngineInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
