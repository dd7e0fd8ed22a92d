use shortcut_core::StoreError;
use typed_builder::TypedBuilder;

/// Total insert attempts for a generated alias before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Configures an [`AliasStoreService`](crate::AliasStoreService).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct StoreSettings {
    /// Upper bound on inserts tried for one generated-alias create, the first
    /// attempt included. Must be at least 1.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl StoreSettings {
    pub(crate) fn validate(&self) -> Result<(), StoreError> {
        if self.max_attempts == 0 {
            return Err(StoreError::InvalidSettings(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
