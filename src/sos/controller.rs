//! SOS state machine and auto-cancel timer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::types::{AlertSink, SosState, SOS_AUTO_CANCEL, SOS_VIBRATION_PATTERN_MS};

struct SosInner<A> {
    sink: A,
    state: Mutex<SosState>,
    timer: Mutex<Option<JoinHandle<()>>>,
    auto_cancel: Duration,
}

impl<A: AlertSink> SosInner<A> {
    fn lock_state(&self) -> MutexGuard<'_, SosState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_timer(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Leaves the Active state, stopping the siren.
    ///
    /// Shared by manual cancel and the auto-cancel timer; a no-op when
    /// the SOS is no longer active (the two paths can race).
    fn deactivate(&self) -> SosState {
        let mut state = self.lock_state();
        if *state == SosState::Active {
            *state = SosState::Idle;
            self.sink.stop_siren();
        }
        *state
    }
}

/// Controller for the SOS flow.
///
/// Drives `Idle → AwaitingConfirmation → Active → Idle` with an explicit
/// confirmation step, device alarm side effects behind [`AlertSink`],
/// and a 30-second auto-cancel timer. Cancellation is a user toggle or
/// the timer, whichever comes first; there are no retry semantics.
///
/// Methods are synchronous and cheap. [`confirm`](Self::confirm) spawns
/// the timer task, so the controller must be used inside a Tokio
/// runtime.
///
/// # Example
///
/// ```ignore
/// use aegis_core::sos::{SosController, SosState};
///
/// let sos = SosController::new(platform_alarm);
/// assert_eq!(sos.request_activation(), SosState::AwaitingConfirmation);
/// assert_eq!(sos.confirm(), SosState::Active);
/// // ... 30 seconds later the SOS has cancelled itself.
/// ```
pub struct SosController<A> {
    inner: Arc<SosInner<A>>,
}

impl<A: AlertSink + 'static> SosController<A> {
    /// Creates an idle controller with the default 30-second auto-cancel.
    #[must_use]
    pub fn new(sink: A) -> Self {
        Self::with_auto_cancel(sink, SOS_AUTO_CANCEL)
    }

    /// Creates an idle controller with a custom auto-cancel duration.
    #[must_use]
    pub fn with_auto_cancel(sink: A, auto_cancel: Duration) -> Self {
        Self {
            inner: Arc::new(SosInner {
                sink,
                state: Mutex::new(SosState::Idle),
                timer: Mutex::new(None),
                auto_cancel,
            }),
        }
    }

    /// Current state of the flow.
    #[must_use]
    pub fn state(&self) -> SosState {
        *self.inner.lock_state()
    }

    /// Handles a press of the SOS control.
    ///
    /// From `Idle` this asks for confirmation; while `Active` it is the
    /// cancel toggle. A press while already awaiting confirmation
    /// changes nothing.
    pub fn request_activation(&self) -> SosState {
        {
            let mut state = self.inner.lock_state();
            match *state {
                SosState::Idle => {
                    *state = SosState::AwaitingConfirmation;
                    return *state;
                }
                SosState::AwaitingConfirmation => return *state,
                SosState::Active => {}
            }
        }
        self.cancel()
    }

    /// Confirms a pending activation.
    ///
    /// Plays the vibration pattern, starts the siren, and arms the
    /// auto-cancel timer. Without a pending confirmation this is a
    /// no-op returning the current state.
    pub fn confirm(&self) -> SosState {
        {
            let mut state = self.inner.lock_state();
            if *state != SosState::AwaitingConfirmation {
                return *state;
            }
            *state = SosState::Active;
            self.inner.sink.vibrate(SOS_VIBRATION_PATTERN_MS);
            self.inner.sink.start_siren();
        }

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.auto_cancel).await;
            debug!("SOS auto-cancel timer elapsed");
            inner.deactivate();
        });
        *self.inner.lock_timer() = Some(handle);

        SosState::Active
    }

    /// Declines a pending confirmation.
    ///
    /// A no-op in any other state.
    pub fn dismiss(&self) -> SosState {
        let mut state = self.inner.lock_state();
        if *state == SosState::AwaitingConfirmation {
            *state = SosState::Idle;
        }
        *state
    }

    /// Cancels an active SOS: stops the siren and disarms the timer.
    ///
    /// A no-op when nothing is active.
    pub fn cancel(&self) -> SosState {
        if let Some(handle) = self.inner.lock_timer().take() {
            handle.abort();
        }
        self.inner.deactivate()
    }
}
