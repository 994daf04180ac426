//! Core types for daymark.
//!
//! This crate provides everything the daymark front-ends share:
//! - `DateKey` and `Markings`, the per-day display state
//! - `host` module with the calendar host trait and its provider protocol
//! - `DayMarker`, the session that ties discovery, aggregation and creation together

pub mod calendar;
pub mod config;
pub mod constants;
pub mod date_key;
pub mod error;
pub mod event;
pub mod host;
pub mod marking;
pub mod session;
pub mod window;

pub use date_key::DateKey;
pub use marking::{DayMark, Markings};
pub use session::{CreateOutcome, DayMarker, Discovery};
