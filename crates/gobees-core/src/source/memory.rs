//! In-memory backing store.
//!
//! `MemoryDataSource` is the reference implementation of
//! [`GoBeesDataSource`]: a seeded set of apiaries behind an async lock.
//! It backs tests and embedders that do not bring their own persistence
//! engine.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{Apiary, ApiaryId, Hive, HiveId, Recording};

use super::{DataError, GoBeesDataSource};

pub struct MemoryDataSource {
    apiaries: RwLock<HashMap<ApiaryId, Apiary>>,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self {
            apiaries: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_apiaries(apiaries: Vec<Apiary>) -> Self {
        let map = apiaries.into_iter().map(|a| (a.id, a)).collect();
        Self {
            apiaries: RwLock::new(map),
        }
    }

    /// Seeds or replaces an apiary, including its hives and recordings.
    pub async fn insert_apiary(&self, apiary: Apiary) {
        self.apiaries.write().await.insert(apiary.id, apiary);
    }
}

impl Default for MemoryDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GoBeesDataSource for MemoryDataSource {
    async fn get_apiary_with_hives(&self, apiary_id: ApiaryId) -> Result<Apiary, DataError> {
        let apiaries = self.apiaries.read().await;
        let mut apiary = apiaries
            .get(&apiary_id)
            .cloned()
            .ok_or(DataError::NotAvailable)?;
        // Recordings are loaded per hive, not with the apiary.
        for hive in &mut apiary.hives {
            hive.recordings.clear();
        }
        Ok(apiary)
    }

    async fn get_hive_with_recordings(&self, hive_id: HiveId) -> Result<Hive, DataError> {
        let apiaries = self.apiaries.read().await;
        apiaries
            .values()
            .flat_map(|a| a.hives.iter())
            .find(|h| h.id == hive_id)
            .cloned()
            .ok_or(DataError::NotAvailable)
    }

    async fn save_hive(&self, hive: Hive) -> Result<(), DataError> {
        let mut apiaries = self.apiaries.write().await;
        let apiary = apiaries
            .get_mut(&hive.apiary_id)
            .ok_or(DataError::NotAvailable)?;
        match apiary.hives.iter_mut().find(|h| h.id == hive.id) {
            Some(existing) => {
                debug!(hive_id = hive.id, "updating hive");
                existing.name = hive.name;
            }
            None => {
                debug!(hive_id = hive.id, apiary_id = hive.apiary_id, "creating hive");
                apiary.hives.push(hive);
            }
        }
        Ok(())
    }

    async fn delete_hive(&self, apiary_id: ApiaryId, hive_id: HiveId) -> Result<(), DataError> {
        let mut apiaries = self.apiaries.write().await;
        let apiary = apiaries
            .get_mut(&apiary_id)
            .ok_or_else(|| DataError::OperationFailed(format!("no such apiary: {apiary_id}")))?;
        let before = apiary.hives.len();
        apiary.hives.retain(|h| h.id != hive_id);
        if apiary.hives.len() == before {
            return Err(DataError::OperationFailed(format!(
                "no such hive: {hive_id}"
            )));
        }
        debug!(hive_id, apiary_id, "hive deleted");
        Ok(())
    }

    async fn save_recording(&self, recording: Recording) -> Result<(), DataError> {
        let mut apiaries = self.apiaries.write().await;
        let hive = apiaries
            .values_mut()
            .flat_map(|a| a.hives.iter_mut())
            .find(|h| h.id == recording.hive_id)
            .ok_or(DataError::NotAvailable)?;
        if hive.recording_at(recording.date).is_some() {
            return Err(DataError::OperationFailed(format!(
                "recording already exists at {}",
                recording.date
            )));
        }
        hive.recordings.push(recording);
        Ok(())
    }

    async fn delete_recording(
        &self,
        hive_id: HiveId,
        recording: &Recording,
    ) -> Result<(), DataError> {
        let mut apiaries = self.apiaries.write().await;
        let hive = apiaries
            .values_mut()
            .flat_map(|a| a.hives.iter_mut())
            .find(|h| h.id == hive_id)
            .ok_or_else(|| DataError::OperationFailed(format!("no such hive: {hive_id}")))?;
        let before = hive.recordings.len();
        hive.recordings.retain(|r| r.date != recording.date);
        if hive.recordings.len() == before {
            return Err(DataError::OperationFailed(format!(
                "no such recording: {}",
                recording.date
            )));
        }
        debug!(hive_id, date = %recording.date, "recording deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::sample_apiary;

    #[tokio::test]
    async fn apiary_hives_come_without_recordings() {
        let source = MemoryDataSource::with_apiaries(vec![sample_apiary(1, &[(10, 3)])]);

        let apiary = source.get_apiary_with_hives(1).await.unwrap();
        assert_eq!(apiary.hives.len(), 1);
        assert!(apiary.hives[0].recordings.is_empty());

        let hive = source.get_hive_with_recordings(10).await.unwrap();
        assert_eq!(hive.recordings.len(), 3);
    }

    #[tokio::test]
    async fn missing_entities_are_not_available() {
        let source = MemoryDataSource::new();
        assert_eq!(
            source.get_apiary_with_hives(1).await,
            Err(DataError::NotAvailable)
        );
        assert_eq!(
            source.get_hive_with_recordings(10).await,
            Err(DataError::NotAvailable)
        );
    }

    #[tokio::test]
    async fn save_hive_creates_and_renames() {
        let source = MemoryDataSource::with_apiaries(vec![sample_apiary(1, &[])]);

        source.save_hive(Hive::new(10, 1, "North")).await.unwrap();
        source.save_hive(Hive::new(10, 1, "North B")).await.unwrap();

        let apiary = source.get_apiary_with_hives(1).await.unwrap();
        assert_eq!(apiary.hives.len(), 1);
        assert_eq!(apiary.hives[0].name, "North B");
    }

    #[tokio::test]
    async fn duplicate_recording_date_is_rejected() {
        let source = MemoryDataSource::with_apiaries(vec![sample_apiary(1, &[(10, 1)])]);
        let existing = source.get_hive_with_recordings(10).await.unwrap().recordings[0].clone();

        let result = source.save_recording(existing).await;
        assert!(matches!(result, Err(DataError::OperationFailed(_))));
    }

    #[tokio::test]
    async fn delete_recording_removes_only_the_target() {
        let source = MemoryDataSource::with_apiaries(vec![sample_apiary(1, &[(10, 2)])]);
        let target = source.get_hive_with_recordings(10).await.unwrap().recordings[0].clone();

        source.delete_recording(10, &target).await.unwrap();

        let hive = source.get_hive_with_recordings(10).await.unwrap();
        assert_eq!(hive.recordings.len(), 1);
        assert!(hive.recording_at(target.date).is_none());

        // Deleting again fails without touching the remaining recording
        assert!(source.delete_recording(10, &target).await.is_err());
        assert_eq!(
            source.get_hive_with_recordings(10).await.unwrap().recordings.len(),
            1
        );
    }

    #[tokio::test]
    async fn delete_hive_drops_its_recordings() {
        let source = MemoryDataSource::with_apiaries(vec![sample_apiary(1, &[(10, 2), (11, 1)])]);

        source.delete_hive(1, 10).await.unwrap();

        let apiary = source.get_apiary_with_hives(1).await.unwrap();
        assert_eq!(apiary.hives.len(), 1);
        assert_eq!(
            source.get_hive_with_recordings(10).await,
            Err(DataError::NotAvailable)
        );
    }
}
