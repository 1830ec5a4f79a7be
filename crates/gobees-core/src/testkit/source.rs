//! Scriptable backing store for repository and presenter tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::models::{Apiary, ApiaryId, Hive, HiveId, Recording};
use crate::source::{DataError, GoBeesDataSource, MemoryDataSource};

/// A [`GoBeesDataSource`] wrapping [`MemoryDataSource`] with a fetch
/// counter, switchable read/write failure, and an optional gate that holds
/// fetches in flight until released.
pub struct ScriptedSource {
    inner: MemoryDataSource,
    fetches: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    gate: std::sync::Mutex<Option<Arc<Semaphore>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::with_source(MemoryDataSource::new())
    }

    pub fn with_apiaries(apiaries: Vec<Apiary>) -> Self {
        Self::with_source(MemoryDataSource::with_apiaries(apiaries))
    }

    fn with_source(inner: MemoryDataSource) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            gate: std::sync::Mutex::new(None),
        }
    }

    /// Total number of read fetches issued against the store.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Holds every subsequent fetch in flight until permits are added to
    /// the returned semaphore (one permit per fetch).
    pub fn hold_fetches(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    async fn enter_fetch(&self) -> Result<(), DataError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire()
                .await
                .map_err(|_| DataError::NotAvailable)?
                .forget();
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DataError::NotAvailable);
        }
        Ok(())
    }

    fn enter_write(&self) -> Result<(), DataError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DataError::OperationFailed("write failure injected".into()));
        }
        Ok(())
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GoBeesDataSource for ScriptedSource {
    async fn get_apiary_with_hives(&self, apiary_id: ApiaryId) -> Result<Apiary, DataError> {
        self.enter_fetch().await?;
        self.inner.get_apiary_with_hives(apiary_id).await
    }

    async fn get_hive_with_recordings(&self, hive_id: HiveId) -> Result<Hive, DataError> {
        self.enter_fetch().await?;
        self.inner.get_hive_with_recordings(hive_id).await
    }

    async fn save_hive(&self, hive: Hive) -> Result<(), DataError> {
        self.enter_write()?;
        self.inner.save_hive(hive).await
    }

    async fn delete_hive(&self, apiary_id: ApiaryId, hive_id: HiveId) -> Result<(), DataError> {
        self.enter_write()?;
        self.inner.delete_hive(apiary_id, hive_id).await
    }

    async fn save_recording(&self, recording: Recording) -> Result<(), DataError> {
        self.enter_write()?;
        self.inner.save_recording(recording).await
    }

    async fn delete_recording(
        &self,
        hive_id: HiveId,
        recording: &Recording,
    ) -> Result<(), DataError> {
        self.enter_write()?;
        self.inner.delete_recording(hive_id, recording).await
    }
}
