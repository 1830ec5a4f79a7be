use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::HiveId;

/// A single monitoring session for one hive.
///
/// Recordings are immutable once created and identified within their hive
/// by the session start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub hive_id: HiveId,
    pub date: DateTime<Utc>,
    /// Number of frames analysed during the session.
    #[serde(default)]
    pub frame_count: u32,
}

impl Recording {
    pub fn new(hive_id: HiveId, date: DateTime<Utc>, frame_count: u32) -> Self {
        Self {
            hive_id,
            date,
            frame_count,
        }
    }
}
