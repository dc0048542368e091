//! SOS and quick-action emergency alerting.
//!
//! A single user-triggered action with a confirmation step, a device
//! alarm (vibration + looping siren), and a 30-second auto-cancel.
//! Cancellation is either the user pressing the control again or the
//! timer elapsing.
//!
//! Device side effects go through the [`AlertSink`] trait; the platform
//! wires in the real vibration motor and audio output.

mod controller;
pub mod types;

pub use controller::SosController;
pub use types::{AlertSink, SosState, SOS_AUTO_CANCEL, SOS_VIBRATION_PATTERN_MS};
