use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shortcut_core::repository::Result;
use shortcut_core::{Alias, MappingId, MappingRecord, Repository, StorageError};
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::trace;

#[derive(Debug, Clone)]
struct Stored {
    id: MappingId,
    url: String,
}

/// In-memory implementation of the [`Repository`] contract using DashMap.
///
/// Inserts go through the entry API, so the existence check and the write
/// happen under the same shard lock. Ids come from a counter that is never
/// rewound, so a deleted id is never handed out again.
#[derive(Debug)]
pub struct InMemoryRepository {
    storage: DashMap<String, Stored>,
    next_id: AtomicI64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of live mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, alias: &Alias, url: &str) -> Result<MappingId> {
        match self.storage.entry(alias.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(alias.to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(Stored {
                    id,
                    url: url.to_owned(),
                });
                trace!(alias = %alias, id, "inserted mapping");
                Ok(id)
            }
        }
    }

    async fn get(&self, alias: &Alias) -> Result<Option<MappingRecord>> {
        Ok(self.storage.get(alias.as_str()).map(|stored| MappingRecord {
            id: stored.id,
            alias: alias.clone(),
            url: stored.url.clone(),
        }))
    }

    async fn delete(&self, alias: &Alias) -> Result<bool> {
        Ok(self.storage.remove(alias.as_str()).is_some())
    }
}
