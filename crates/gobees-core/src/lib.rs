//! Core library for GoBees - recording and reviewing beehive activity.
//!
//! The crate is organized in four layers:
//!
//! - [`models`]: the domain entities (apiaries, hives, recordings)
//! - [`source`]: the asynchronous contract of the backing store
//! - [`cache`]: `GoBeesRepository`, the read-through cache mediating all
//!   reads and writes
//! - [`presenter`]: per-screen controllers binding display surfaces to the
//!   repository
//!
//! UI surfaces implement the view traits in [`presenter`] and drive the
//! presenters; the repository is shared across screens through an `Arc`.

pub mod cache;
pub mod config;
pub mod models;
pub mod presenter;
pub mod source;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use cache::GoBeesRepository;
pub use config::Config;
pub use models::{Apiary, ApiaryId, Hive, HiveId, Recording};
pub use source::{DataError, GoBeesDataSource, MemoryDataSource};
