//! InMemoryContentStore - BTreeMap-backed content store for tests and demos.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::{ContentStore, Record, StoreError};

struct Inner {
    records: BTreeMap<u64, Record>,
    next_id: u64,
}

/// In-memory content store.
///
/// Ids start at 1 and only ever grow. Clone-friendly via Arc: clones share
/// the same records.
#[derive(Clone)]
pub struct InMemoryContentStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Number of live records.
    pub fn len(&self) -> Result<usize, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Snapshot of every live record, ordered by id.
    pub fn records(&self) -> Result<Vec<Record>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.records.values().cloned().collect())
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".into())
}

impl ContentStore for InMemoryContentStore {
    fn create(&self, title: &str, content: &str) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.insert(
            id,
            Record {
                id,
                title: title.to_string(),
                content: content.to_string(),
            },
        );

        Ok(id)
    }

    fn read(&self, id: u64) -> Result<Record, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        inner
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn update(&self, id: u64, content: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        let record = inner
            .records
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        record.content = content.to_string();
        Ok(())
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        inner
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
