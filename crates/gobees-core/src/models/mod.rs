//! Data models for GoBees entities.
//!
//! This module contains the data structures used to represent
//! monitored beehive activity:
//!
//! - `Apiary`: a collection of hives at one location
//! - `Hive`: a monitored beehive, owning a sequence of recordings
//! - `Recording`: a timestamped monitoring session for one hive

pub mod apiary;
pub mod hive;
pub mod recording;

pub use apiary::Apiary;
pub use hive::Hive;
pub use recording::Recording;

/// Identifier of an apiary, unique within the store.
pub type ApiaryId = i64;

/// Identifier of a hive, unique within the store.
pub type HiveId = i64;
