//! Aegis Core Library
//!
//! Core functionality for Aegis - a personal safety companion.
//! This crate provides the Rust implementation for core Aegis operations:
//! the safety-score engine, emergency contacts, SOS, location sharing,
//! local preferences, and the backend account client.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod account;
pub mod alerts;
pub mod contacts;
pub mod location;
pub mod prefs;
pub mod score;
pub mod sos;

pub use api::{AegisCore, CoreError};
