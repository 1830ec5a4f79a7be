use serde::{Deserialize, Serialize};

use super::{ApiaryId, Hive, HiveId};

/// A collection of hives at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apiary {
    pub id: ApiaryId,
    pub name: String,
    #[serde(default)]
    pub hives: Vec<Hive>,
}

impl Apiary {
    pub fn new(id: ApiaryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hives: Vec::new(),
        }
    }

    pub fn has_hives(&self) -> bool {
        !self.hives.is_empty()
    }

    pub fn hive(&self, hive_id: HiveId) -> Option<&Hive> {
        self.hives.iter().find(|h| h.id == hive_id)
    }
}
