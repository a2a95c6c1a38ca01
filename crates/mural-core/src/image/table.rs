use serde::{Deserialize, Serialize};

use super::record::ImageRecord;
use crate::ids::ImageId;

/// The authoritative in-memory collection of all known images.
///
/// Insertion order is preserved; display order lives in the strips, not
/// here. The table is session-sized, so linear lookups are fine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RecordTable {
    records: Vec<ImageRecord>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ImageRecord>) -> Self {
        Self { records }
    }

    /// Insert a record, replacing any existing record with the same id
    /// in place.
    pub fn insert(&mut self, record: ImageRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn get(&self, id: &ImageId) -> Option<&ImageRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn get_mut(&mut self, id: &ImageId) -> Option<&mut ImageRecord> {
        self.records.iter_mut().find(|r| &r.id == id)
    }

    pub fn remove(&mut self, id: &ImageId) -> Option<ImageRecord> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn contains(&self, id: &ImageId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ImageRecord> {
        self.records.iter_mut()
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ImageRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
