//! In-memory candidate registry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::types::{Candidate, CandidateFilter};

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<Uuid, Candidate>,
    /// Insertion order, so unfiltered lists stay stable per process run.
    order: Vec<Uuid>,
}

/// Thread-safe in-memory candidate store.
///
/// Records live for the process lifetime only; nothing is persisted.
/// A single lock guards both the map and the order index, so readers can
/// never observe a half-inserted or half-removed entry.
#[derive(Debug, Default)]
pub struct CandidateStore {
    inner: RwLock<Inner>,
}

impl CandidateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock means a panic elsewhere, not inconsistent data:
    // every write section leaves the map and index in sync.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a record keyed by its id.
    ///
    /// Re-inserting an existing id replaces the record in place without
    /// changing its list position.
    pub fn insert(&self, candidate: Candidate) {
        let id = candidate.id;
        let mut inner = self.write();
        if inner.records.insert(id, candidate).is_none() {
            inner.order.push(id);
        }
    }

    /// Fetch a record by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<Candidate> {
        self.read().records.get(&id).cloned()
    }

    /// Remove a record by id, returning it if it was present.
    pub fn remove(&self, id: Uuid) -> Option<Candidate> {
        let mut inner = self.write();
        let removed = inner.records.remove(&id);
        if removed.is_some() {
            inner.order.retain(|entry| *entry != id);
        }
        removed
    }

    /// List records matching the filter, in insertion order.
    #[must_use]
    pub fn list(&self, filter: &CandidateFilter) -> Vec<Candidate> {
        let inner = self.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id))
            .filter(|candidate| filter.matches(candidate))
            .cloned()
            .collect()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    /// True if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }
}
