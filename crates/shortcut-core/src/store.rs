use crate::alias::Alias;
use crate::error::StoreError;
use crate::repository::MappingId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, StoreError>;

/// Parameters for creating a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateParams {
    /// The URL to store. Kept byte for byte.
    pub url: String,
    /// Caller-chosen alias. `None` asks the store to generate one.
    pub alias: Option<Alias>,
}

impl CreateParams {
    /// Parameters for a mapping with a generated alias.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alias: None,
        }
    }

    /// Parameters for a mapping with a caller-chosen alias.
    pub fn with_alias(url: impl Into<String>, alias: Alias) -> Self {
        Self {
            url: url.into(),
            alias: Some(alias),
        }
    }

    /// Builds parameters from decoded request fields.
    ///
    /// An absent or empty alias both mean "generate one".
    pub fn from_parts(url: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            url: url.into(),
            alias: alias.filter(|a| !a.is_empty()).map(Alias::new_unchecked),
        }
    }
}

/// The outcome of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedMapping {
    pub id: MappingId,
    /// The alias that was stored, generated or caller-chosen.
    pub alias: Alias,
}

#[async_trait]
pub trait AliasStore: Send + Sync + 'static {
    /// Creates a mapping and returns its id together with the stored alias.
    ///
    /// A caller-chosen alias that is already live fails with
    /// [`StoreError::AliasExists`]. Generated aliases are retried on collision
    /// and fail with [`StoreError::AliasSpaceExhausted`] once the retry budget
    /// is spent.
    async fn create(&self, params: CreateParams) -> Result<CreatedMapping>;

    /// Resolves an alias to its URL. Fails with [`StoreError::NotFound`] if
    /// no live mapping uses the alias.
    async fn resolve(&self, alias: &Alias) -> Result<String>;

    /// Deletes the mapping for an alias. Fails with [`StoreError::NotFound`]
    /// if no live mapping uses the alias.
    async fn delete(&self, alias: &Alias) -> Result<()>;
}
