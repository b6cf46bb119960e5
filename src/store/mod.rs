//! Content store: the mutable message store the facade sits in front of.
//!
//! The facade only needs create/read/update/delete keyed by id. Anything
//! that can provide those (a database table, a KV bucket, a `Vec`) can sit
//! behind [`ContentStore`]; [`InMemoryContentStore`] is the default.

mod in_memory;

use std::sync::Arc;

use thiserror::Error;

pub use in_memory::InMemoryContentStore;

/// A stored message. `id` is assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub title: String,
    pub content: String,
}

/// Error type for content store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The id does not currently exist.
    #[error("record {0} not found")]
    NotFound(u64),
    /// Backend failure (poisoned lock, lost connection, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// CRUD storage for [`Record`]s.
///
/// Ids are never reused within one store instance, even after deletion.
pub trait ContentStore: Send + Sync {
    /// Create a record and return its newly assigned id.
    fn create(&self, title: &str, content: &str) -> Result<u64, StoreError>;

    fn read(&self, id: u64) -> Result<Record, StoreError>;

    /// Replace the content of an existing record.
    fn update(&self, id: u64, content: &str) -> Result<(), StoreError>;

    fn delete(&self, id: u64) -> Result<(), StoreError>;
}

impl<S: ContentStore + ?Sized> ContentStore for Arc<S> {
    fn create(&self, title: &str, content: &str) -> Result<u64, StoreError> {
        (**self).create(title, content)
    }

    fn read(&self, id: u64) -> Result<Record, StoreError> {
        (**self).read(id)
    }

    fn update(&self, id: u64, content: &str) -> Result<(), StoreError> {
        (**self).update(id, content)
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        (**self).delete(id)
    }
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn create(&self, title: &str, content: &str) -> Result<u64, StoreError> {
        (**self).create(title, content)
    }

    fn read(&self, id: u64) -> Result<Record, StoreError> {
        (**self).read(id)
    }

    fn update(&self, id: u64, content: &str) -> Result<(), StoreError> {
        (**self).update(id, content)
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        (**self).delete(id)
    }
}
