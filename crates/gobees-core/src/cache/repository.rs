use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{Apiary, ApiaryId, Hive, HiveId, Recording};
use crate::source::{DataError, GoBeesDataSource};

/// Consider cache entries stale after 1 hour unless configured otherwise.
const CACHE_STALE_MINUTES: i64 = 60;

/// A cached entity together with its bookkeeping.
#[derive(Debug, Clone)]
struct CachedEntry<T> {
    data: T,
    fetched_at: DateTime<Utc>,
    /// Set by an explicit refresh request; forces the next read to refetch.
    invalidated: bool,
}

impl<T> CachedEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            fetched_at: Utc::now(),
            invalidated: false,
        }
    }

    fn age_minutes(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_minutes()
    }

    fn is_fresh(&self, stale_after: Duration) -> bool {
        !self.invalidated && Utc::now() - self.fetched_at < stale_after
    }
}

/// Single source of truth for UI-facing reads.
///
/// Holds an in-memory cache of apiaries and hives sourced from the backing
/// store. Entries are replaced wholesale on a successful fetch, never
/// merged field by field, and a failed fetch leaves the previous entry
/// untouched. Concurrent fetches for the same identifier coalesce into one
/// store fetch.
///
/// The repository is the only mutator of cached state; presenters request
/// operations, they never edit entities directly.
pub struct GoBeesRepository {
    source: Arc<dyn GoBeesDataSource>,
    stale_after: Duration,
    apiaries: Mutex<HashMap<ApiaryId, CachedEntry<Apiary>>>,
    hives: Mutex<HashMap<HiveId, CachedEntry<Hive>>>,
    inflight_apiaries: Mutex<HashMap<ApiaryId, Arc<Mutex<()>>>>,
    inflight_hives: Mutex<HashMap<HiveId, Arc<Mutex<()>>>>,
}

impl GoBeesRepository {
    pub fn new(source: Arc<dyn GoBeesDataSource>) -> Self {
        Self::with_stale_after(source, Duration::minutes(CACHE_STALE_MINUTES))
    }

    pub fn with_stale_after(source: Arc<dyn GoBeesDataSource>, stale_after: Duration) -> Self {
        Self {
            source,
            stale_after,
            apiaries: Mutex::new(HashMap::new()),
            hives: Mutex::new(HashMap::new()),
            inflight_apiaries: Mutex::new(HashMap::new()),
            inflight_hives: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(source: Arc<dyn GoBeesDataSource>, config: &Config) -> Self {
        Self::with_stale_after(source, config.stale_after())
    }

    // =========================================================================
    // Hives and their recordings
    // =========================================================================

    /// Returns the hive with its recordings populated.
    ///
    /// Serves the cached copy when it is present, not invalidated and
    /// within the staleness window; otherwise fetches from the backing
    /// store and replaces the cache entry wholesale. Completes exactly
    /// once per invocation.
    pub async fn get_hive_with_recordings(&self, hive_id: HiveId) -> Result<Hive, DataError> {
        if let Some(entry) = self.hives.lock().await.get(&hive_id) {
            if entry.is_fresh(self.stale_after) {
                debug!(hive_id, age_minutes = entry.age_minutes(), "serving hive from cache");
                return Ok(entry.data.clone());
            }
        }

        // Coalesce concurrent fetches for the same hive: the first caller
        // fetches, later callers wait on the guard and re-read the cache.
        let flight = self.hive_flight(hive_id).await;
        let _held = flight.lock().await;

        if let Some(entry) = self.hives.lock().await.get(&hive_id) {
            if entry.is_fresh(self.stale_after) {
                debug!(hive_id, "hive fetched by a concurrent request");
                return Ok(entry.data.clone());
            }
        }

        debug!(hive_id, "fetching hive from the backing store");
        match self.source.get_hive_with_recordings(hive_id).await {
            Ok(hive) => {
                self.hives
                    .lock()
                    .await
                    .insert(hive_id, CachedEntry::new(hive.clone()));
                Ok(hive)
            }
            Err(e) => {
                warn!(hive_id, error = %e, "hive fetch failed");
                Err(e)
            }
        }
    }

    /// Invalidates the cached recordings for the given hive.
    ///
    /// Returns no data; the next read takes the authoritative fetch path.
    pub async fn refresh_recordings(&self, hive_id: HiveId) {
        if let Some(entry) = self.hives.lock().await.get_mut(&hive_id) {
            entry.invalidated = true;
            debug!(hive_id, "recordings invalidated");
        }
    }

    /// Deletes a recording from the backing store and, on confirmed
    /// success, from the cached hive. A failed delete leaves the cache
    /// untouched.
    pub async fn delete_recording(
        &self,
        hive_id: HiveId,
        recording: &Recording,
    ) -> Result<(), DataError> {
        self.source.delete_recording(hive_id, recording).await?;
        if let Some(entry) = self.hives.lock().await.get_mut(&hive_id) {
            entry.data.recordings.retain(|r| r.date != recording.date);
        }
        debug!(hive_id, date = %recording.date, "recording deleted");
        Ok(())
    }

    /// Appends a recording via the backing store. The hive's cache entry
    /// is invalidated so the next read returns the authoritative state.
    pub async fn save_recording(&self, recording: Recording) -> Result<(), DataError> {
        let hive_id = recording.hive_id;
        self.source.save_recording(recording).await?;
        if let Some(entry) = self.hives.lock().await.get_mut(&hive_id) {
            entry.invalidated = true;
        }
        Ok(())
    }

    // =========================================================================
    // Apiaries and their hives
    // =========================================================================

    /// Returns the apiary with its hives populated, caching like
    /// [`get_hive_with_recordings`](Self::get_hive_with_recordings).
    pub async fn get_apiary_with_hives(&self, apiary_id: ApiaryId) -> Result<Apiary, DataError> {
        if let Some(entry) = self.apiaries.lock().await.get(&apiary_id) {
            if entry.is_fresh(self.stale_after) {
                debug!(apiary_id, age_minutes = entry.age_minutes(), "serving apiary from cache");
                return Ok(entry.data.clone());
            }
        }

        let flight = self.apiary_flight(apiary_id).await;
        let _held = flight.lock().await;

        if let Some(entry) = self.apiaries.lock().await.get(&apiary_id) {
            if entry.is_fresh(self.stale_after) {
                debug!(apiary_id, "apiary fetched by a concurrent request");
                return Ok(entry.data.clone());
            }
        }

        debug!(apiary_id, "fetching apiary from the backing store");
        match self.source.get_apiary_with_hives(apiary_id).await {
            Ok(apiary) => {
                self.apiaries
                    .lock()
                    .await
                    .insert(apiary_id, CachedEntry::new(apiary.clone()));
                Ok(apiary)
            }
            Err(e) => {
                warn!(apiary_id, error = %e, "apiary fetch failed");
                Err(e)
            }
        }
    }

    /// Invalidates the cached hives for the given apiary.
    pub async fn refresh_hives(&self, apiary_id: ApiaryId) {
        if let Some(entry) = self.apiaries.lock().await.get_mut(&apiary_id) {
            entry.invalidated = true;
            debug!(apiary_id, "hives invalidated");
        }
    }

    /// Creates or renames a hive via the backing store. The parent
    /// apiary's cache entry is invalidated rather than edited in place.
    pub async fn save_hive(&self, hive: Hive) -> Result<(), DataError> {
        let apiary_id = hive.apiary_id;
        self.source.save_hive(hive).await?;
        if let Some(entry) = self.apiaries.lock().await.get_mut(&apiary_id) {
            entry.invalidated = true;
        }
        Ok(())
    }

    /// Deletes a hive from the backing store and, on confirmed success,
    /// from the cached apiary. The hive's own cache entry is dropped with
    /// it, cascading to its recordings.
    pub async fn delete_hive(&self, apiary_id: ApiaryId, hive_id: HiveId) -> Result<(), DataError> {
        self.source.delete_hive(apiary_id, hive_id).await?;
        if let Some(entry) = self.apiaries.lock().await.get_mut(&apiary_id) {
            entry.data.hives.retain(|h| h.id != hive_id);
        }
        self.hives.lock().await.remove(&hive_id);
        debug!(hive_id, apiary_id, "hive deleted");
        Ok(())
    }

    // =========================================================================
    // Cache warming
    // =========================================================================

    /// Warms the cache by fetching the given apiaries concurrently.
    ///
    /// Best-effort: failures are logged and skipped.
    pub async fn warm(&self, apiary_ids: &[ApiaryId]) {
        let fetches = apiary_ids.iter().map(|&id| self.get_apiary_with_hives(id));
        for (&apiary_id, result) in apiary_ids.iter().zip(join_all(fetches).await) {
            if let Err(e) = result {
                warn!(apiary_id, error = %e, "apiary warm-up fetch failed");
            }
        }
    }

    async fn hive_flight(&self, hive_id: HiveId) -> Arc<Mutex<()>> {
        let mut inflight = self.inflight_hives.lock().await;
        Arc::clone(inflight.entry(hive_id).or_default())
    }

    async fn apiary_flight(&self, apiary_id: ApiaryId) -> Arc<Mutex<()>> {
        let mut inflight = self.inflight_apiaries.lock().await;
        Arc::clone(inflight.entry(apiary_id).or_default())
    }
}

// ============================================================================
// Tests
// ============================================================================
