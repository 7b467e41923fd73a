use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Slots every medical packet is expected to fill.
pub const STANDARD_SLOTS: &[&str] = &[
    "chest_xray",
    "cbc",
    "blood_typing",
    "urinalysis",
    "drug_test",
    "hepa_b",
];

/// Required document slots of a submission, keyed by slot name.
///
/// A slot holds the storage reference of the uploaded file, or `None` while
/// it is still missing. The workflow never writes to this map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct DocumentSlots(BTreeMap<String, Option<String>>);

impl DocumentSlots {
    /// Empty standard packet: every standard slot present and unfilled.
    pub fn standard() -> Self {
        Self(
            STANDARD_SLOTS
                .iter()
                .map(|slot| (slot.to_string(), None))
                .collect(),
        )
    }

    /// Set a slot's file reference, adding the slot if it is not known yet.
    pub fn with_file(mut self, slot: &str, file_ref: impl Into<String>) -> Self {
        self.0.insert(slot.to_string(), Some(file_ref.into()));
        self
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.0.get(slot).and_then(|f| f.as_deref())
    }

    pub fn total(&self) -> usize {
        self.0.len()
    }

    pub fn filled(&self) -> usize {
        self.0.values().filter(|f| f.is_some()).count()
    }

    /// Names of the slots still waiting for a file.
    pub fn missing(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, f)| f.is_none())
            .map(|(slot, _)| slot.as_str())
            .collect()
    }

    /// Completion as a whole percentage (0-100), rounded to nearest.
    pub fn completion_percent(&self) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.filled() * 100 + total / 2) / total) as u8
    }
}
