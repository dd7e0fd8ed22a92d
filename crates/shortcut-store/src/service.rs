use crate::settings::StoreSettings;
use async_trait::async_trait;
use shortcut_core::{
    Alias, AliasStore, CoreError, CreateParams, CreatedMapping, Repository, StorageError,
    StoreError,
};
use shortcut_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// A concrete implementation of the [`AliasStore`] trait.
///
/// This service wraps a [`Repository`] and a [`Generator`]:
/// - caller-chosen aliases get exactly one insert; a collision is a conflict
/// - generated aliases are retried on collision, up to
///   [`StoreSettings::max_attempts`] inserts in total
/// - any other storage failure is returned at once, never retried
#[derive(Debug)]
pub struct AliasStoreService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    settings: StoreSettings,
}

impl<R, G> Clone for AliasStoreService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            settings: self.settings,
        }
    }
}

impl<R: Repository, G: Generator> AliasStoreService<R, G> {
    /// Creates a service with default settings.
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            settings: StoreSettings::default(),
        }
    }

    /// Creates a service with explicit settings.
    pub fn with_settings(
        repository: R,
        generator: G,
        settings: StoreSettings,
    ) -> Result<Self, StoreError> {
        settings.validate()?;
        Ok(Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            settings,
        })
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    async fn insert_explicit(&self, alias: Alias, url: &str) -> Result<CreatedMapping, StoreError> {
        let id = self.repository.insert(&alias, url).await?;
        info!(alias = %alias, id, "created mapping");
        Ok(CreatedMapping { id, alias })
    }

    async fn insert_generated(&self, url: &str) -> Result<CreatedMapping, StoreError> {
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            let alias: Alias = self.generator.generate().into();
            if alias.as_str().is_empty() {
                return Err(CoreError::InvalidAlias(
                    "generator produced an empty alias".to_string(),
                )
                .into());
            }

            match self.repository.insert(&alias, url).await {
                Ok(id) => {
                    info!(alias = %alias, id, attempt, "created mapping with generated alias");
                    return Ok(CreatedMapping { id, alias });
                }
                Err(StorageError::Conflict(_)) => {
                    debug!(alias = %alias, attempt, max_attempts, "generated alias collided");
                }
                Err(err) => return Err(StoreError::StorageUnavailable(err)),
            }
        }

        warn!(max_attempts, "no free alias found");
        Err(StoreError::AliasSpaceExhausted {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl<R: Repository, G: Generator> AliasStore for AliasStoreService<R, G> {
    async fn create(&self, params: CreateParams) -> Result<CreatedMapping, StoreError> {
        if params.url.is_empty() {
            return Err(StoreError::EmptyUrl);
        }

        match params.alias {
            Some(alias) => self.insert_explicit(alias, &params.url).await,
            None => self.insert_generated(&params.url).await,
        }
    }

    async fn resolve(&self, alias: &Alias) -> Result<String, StoreError> {
        trace!(alias = %alias, "resolving alias");

        let record = self
            .repository
            .get(alias)
            .await
            .map_err(StoreError::StorageUnavailable)?;

        match record {
            Some(record) => Ok(record.url),
            None => {
                trace!(alias = %alias, "alias not found");
                Err(StoreError::NotFound(alias.to_string()))
            }
        }
    }

    async fn delete(&self, alias: &Alias) -> Result<(), StoreError> {
        let deleted = self
            .repository
            .delete(alias)
            .await
            .map_err(StoreError::StorageUnavailable)?;

        if deleted {
            info!(alias = %alias, "deleted mapping");
            Ok(())
        } else {
            Err(StoreError::NotFound(alias.to_string()))
        }
    }
}
