use chrono::Utc;
use std::collections::BTreeSet;

use crate::error::{Result, TabulaError};
use crate::model::{Fields, Record, RecordId};

/// Ordered, in-memory collection of records of one entity kind. Order is
/// insertion order unless explicitly permuted by `reorder`. The store does
/// no validation; drafts are checked before they get here.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    records: Vec<Record>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from pre-existing records, rejecting id collisions.
    pub fn with_records(records: Vec<Record>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.id.clone()) {
                return Err(TabulaError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    /// Appends a new record with a fresh id and returns it.
    pub fn create(&mut self, fields: Fields) -> Record {
        let record = Record::new(fields);
        self.records.push(record.clone());
        record
    }

    /// Replaces all fields of a record, preserving its id and position.
    pub fn update(&mut self, id: &RecordId, fields: Fields) -> Result<Record> {
        match self.records.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.fields = fields;
                record.updated_at = Utc::now();
                Ok(record.clone())
            }
            None => Err(TabulaError::NotFound(id.clone())),
        }
    }

    pub fn delete(&mut self, id: &RecordId) -> Result<Record> {
        match self.position(id) {
            Some(index) => Ok(self.records.remove(index)),
            None => Err(TabulaError::NotFound(id.clone())),
        }
    }

    /// Removes every record whose id is in `ids` in one pass, returning the
    /// removed records. Absent ids are skipped without error.
    pub fn delete_many(&mut self, ids: &BTreeSet<RecordId>) -> Vec<Record> {
        let mut removed = Vec::new();
        self.records.retain(|r| {
            if ids.contains(&r.id) {
                removed.push(r.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Moves `id` so it immediately precedes `before`, keeping the relative
    /// order of everything else. No-op when the two are equal or when either
    /// id is unknown. Repeating the same move changes nothing.
    pub fn reorder(&mut self, id: &RecordId, before: &RecordId) {
        if id == before {
            return;
        }
        let (Some(from), Some(_)) = (self.position(id), self.position(before)) else {
            return;
        };
        let record = self.records.remove(from);
        let to = self.position(before).unwrap_or(self.records.len());
        self.records.insert(to, record);
    }
}
