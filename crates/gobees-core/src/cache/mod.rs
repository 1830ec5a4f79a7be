//! Read-through caching layer over the backing store.
//!
//! This module provides `GoBeesRepository`, the single source of truth for
//! UI-facing reads. It hides whether data came from the cache or from a
//! fetch against the store, coalesces concurrent fetches per identifier,
//! and keeps cached copies consistent with confirmed writes.

pub mod repository;

pub use repository::GoBeesRepository;
