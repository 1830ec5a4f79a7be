//! Builders for domain entities used across tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::{Apiary, ApiaryId, Hive, HiveId, Recording};

/// Fixed base date so recording identities are deterministic across tests.
fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// A recording for `hive_id`, offset `index` minutes from the base date.
pub fn sample_recording(hive_id: HiveId, index: u32) -> Recording {
    Recording::new(
        hive_id,
        base_date() + Duration::minutes(i64::from(index)),
        600,
    )
}

/// A hive with `recording_count` deterministic recordings.
pub fn sample_hive(apiary_id: ApiaryId, hive_id: HiveId, recording_count: u32) -> Hive {
    let mut hive = Hive::new(hive_id, apiary_id, format!("Hive {hive_id}"));
    hive.recordings = (0..recording_count)
        .map(|i| sample_recording(hive_id, i))
        .collect();
    hive
}

/// An apiary populated from `(hive_id, recording_count)` pairs.
pub fn sample_apiary(apiary_id: ApiaryId, hives: &[(HiveId, u32)]) -> Apiary {
    let mut apiary = Apiary::new(apiary_id, format!("Apiary {apiary_id}"));
    apiary.hives = hives
        .iter()
        .map(|&(hive_id, count)| sample_hive(apiary_id, hive_id, count))
        .collect();
    apiary
}
