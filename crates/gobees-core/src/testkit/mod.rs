//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] — Builders for domain entities: apiaries, hives, recordings.
//! - [`source`] — [`ScriptedSource`], a counting/failable/gateable
//!   [`GoBeesDataSource`](crate::source::GoBeesDataSource).
//! - [`view`] — [`SpyView`], recording every display call as a
//!   [`DisplayEvent`].

pub mod domain;
pub mod source;
pub mod view;

pub use domain::{sample_apiary, sample_hive, sample_recording};
pub use source::ScriptedSource;
pub use view::{DisplayEvent, SpyView};
