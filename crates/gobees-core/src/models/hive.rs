use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiaryId, HiveId, Recording};

/// A monitored beehive.
///
/// The recordings list holds the most recent successful fetch from the
/// backing store; it may be empty for a hive that has never been monitored
/// or whose recordings have not been loaded yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hive {
    pub id: HiveId,
    pub apiary_id: ApiaryId,
    pub name: String,
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

impl Hive {
    pub fn new(id: HiveId, apiary_id: ApiaryId, name: impl Into<String>) -> Self {
        Self {
            id,
            apiary_id,
            name: name.into(),
            recordings: Vec::new(),
        }
    }

    pub fn has_recordings(&self) -> bool {
        !self.recordings.is_empty()
    }

    /// Looks up a recording by its session date.
    pub fn recording_at(&self, date: DateTime<Utc>) -> Option<&Recording> {
        self.recordings.iter().find(|r| r.date == date)
    }
}
