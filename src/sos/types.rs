//! Types for the SOS flow.

use std::time::Duration;

/// Vibration pattern played when SOS activates, in milliseconds.
pub const SOS_VIBRATION_PATTERN_MS: &[u64] = &[500, 250, 500, 250, 500];

/// How long an active SOS runs before cancelling itself.
pub const SOS_AUTO_CANCEL: Duration = Duration::from_secs(30);

/// State of the SOS flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SosState {
    /// Nothing in progress.
    #[default]
    Idle,
    /// The user asked to activate; waiting on their confirmation.
    AwaitingConfirmation,
    /// SOS is active: alarm running, auto-cancel timer armed.
    Active,
}

impl SosState {
    /// Converts to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingConfirmation => "awaiting_confirmation",
            Self::Active => "active",
        }
    }

    /// Returns whether an SOS is currently active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Device side effects of an active SOS.
///
/// The platform supplies the implementation (vibration motor, audio
/// output). Methods must be cheap and non-blocking; the controller calls
/// them while holding its state lock.
pub trait AlertSink: Send + Sync {
    /// Plays a vibration pattern, alternating on/off durations in
    /// milliseconds.
    fn vibrate(&self, pattern_ms: &[u64]);

    /// Starts the looping siren.
    fn start_siren(&self);

    /// Stops the siren.
    fn stop_siren(&self);
}
