//! Backing-store contract for GoBees data.
//!
//! This module defines `GoBeesDataSource`, the asynchronous contract
//! implemented by the persistence layer and consumed by the repository,
//! together with the `DataError` taxonomy and `MemoryDataSource`, an
//! in-memory reference implementation.

pub mod error;
pub mod memory;

pub use error::DataError;
pub use memory::MemoryDataSource;

use async_trait::async_trait;

use crate::models::{Apiary, ApiaryId, Hive, HiveId, Recording};

/// Asynchronous contract implemented by the backing store.
///
/// Every operation completes exactly once with either the requested data or
/// a [`DataError`]. Implementations must be thread-safe (`Send + Sync`);
/// the repository shares one instance across all callers.
#[async_trait]
pub trait GoBeesDataSource: Send + Sync {
    /// Returns the apiary with its hives populated.
    ///
    /// Hives are returned without their recordings; recordings are loaded
    /// per hive through [`get_hive_with_recordings`](Self::get_hive_with_recordings).
    async fn get_apiary_with_hives(&self, apiary_id: ApiaryId) -> Result<Apiary, DataError>;

    /// Returns the hive with its recordings populated.
    async fn get_hive_with_recordings(&self, hive_id: HiveId) -> Result<Hive, DataError>;

    /// Creates a hive, or updates the name of an existing one.
    async fn save_hive(&self, hive: Hive) -> Result<(), DataError>;

    /// Deletes a hive together with all of its recordings.
    async fn delete_hive(&self, apiary_id: ApiaryId, hive_id: HiveId) -> Result<(), DataError>;

    /// Appends a recording to its hive.
    async fn save_recording(&self, recording: Recording) -> Result<(), DataError>;

    /// Deletes a single recording from its hive.
    async fn delete_recording(
        &self,
        hive_id: HiveId,
        recording: &Recording,
    ) -> Result<(), DataError>;
}
