use crate::alias::Alias;
use crate::error::StorageError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Surrogate key assigned by the repository. Never reused after deletion.
pub type MappingId = i64;

/// A stored alias mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub id: MappingId,
    pub alias: Alias,
    pub url: String,
}

/// The persistent medium behind an alias store.
///
/// Every method is a single atomic operation against the medium. Uniqueness of
/// `alias` is enforced here, not by the caller.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Inserts a new mapping and returns its id.
    ///
    /// Returns `Err(StorageError::Conflict)` if a live mapping already uses the alias.
    async fn insert(&self, alias: &Alias, url: &str) -> Result<MappingId>;

    /// Retrieves the mapping for an alias, or `None` if there is none.
    async fn get(&self, alias: &Alias) -> Result<Option<MappingRecord>>;

    /// Removes the mapping for an alias.
    /// Returns `true` if a mapping existed and was removed.
    async fn delete(&self, alias: &Alias) -> Result<bool>;
}

#[async_trait]
impl<R: Repository + ?Sized> Repository for std::sync::Arc<R> {
    async fn insert(&self, alias: &Alias, url: &str) -> Result<MappingId> {
        (**self).insert(alias, url).await
    }

    async fn get(&self, alias: &Alias) -> Result<Option<MappingRecord>> {
        (**self).get(alias).await
    }

    async fn delete(&self, alias: &Alias) -> Result<bool> {
        (**self).delete(alias).await
    }
}
