use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single roster member. The wire names (`dayOffs`) match the portable
/// save-file format, so the same struct serves both in-memory state and
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    #[serde(rename = "dayOffs", default)]
    pub day_offs: BTreeSet<NaiveDate>,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            name: name.trim().to_string(),
            day_offs: BTreeSet::new(),
        }
    }

    /// Re-trim the display name after deserializing from an external
    /// document; names are whitespace-trimmed on every write.
    pub(crate) fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }

    pub fn is_off(&self, day: NaiveDate) -> bool {
        self.day_offs.contains(&day)
    }
}
