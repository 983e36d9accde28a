//! Canonical, server-synchronized record collection
//!
//! The store is replaced wholesale on every successful fetch (never merged)
//! and cleared when the scope is torn down. It owns the engine's iteration
//! order: stable sorting falls back to this order for equal keys.

use crate::core::record::Record;
use std::collections::HashSet;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct RecordStore<R: Record> {
    records: Vec<R>,
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
        }
    }

    /// Replace the entire collection.
    ///
    /// Records with colliding identifiers are deduplicated (first occurrence
    /// wins). Idempotent under identical input. Returns the kept count.
    pub fn load(&mut self, records: Vec<R>) -> usize {
        let mut seen: HashSet<Uuid> = HashSet::with_capacity(records.len());
        self.records = records
            .into_iter()
            .filter(|record| {
                if seen.insert(record.id()) {
                    true
                } else {
                    warn!(id = %record.id(), "dropping record with duplicate id");
                    false
                }
            })
            .collect();
        self.records.len()
    }

    /// Empty the collection
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
