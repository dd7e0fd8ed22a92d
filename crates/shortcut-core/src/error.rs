use thiserror::Error;

/// Errors raised while building core values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid alias: {0}")]
    InvalidAlias(String),
}

/// Errors reported by a [`Repository`](crate::Repository) implementation.
///
/// `Conflict` is the uniqueness violation and must stay distinguishable from
/// every other failure, since the store decides between retrying and
/// reporting a conflict on it.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("alias already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage initialization failed: {0}")]
    Initialization(String),
}

impl StorageError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::Conflict(_))
    }
}

/// Errors returned by an [`AliasStore`](crate::AliasStore).
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("alias already exists: {0}")]
    AliasExists(String),
    #[error("no free alias found after {attempts} attempts")]
    AliasSpaceExhausted { attempts: u32 },
    #[error("alias not found: {0}")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] StorageError),
    #[error("url must not be empty")]
    EmptyUrl,
    #[error(transparent)]
    InvalidAlias(#[from] CoreError),
    #[error("invalid store settings: {0}")]
    InvalidSettings(String),
}

/// Flat discriminant of a [`StoreError`], for callers that translate errors
/// into their own responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AliasExists,
    AliasSpaceExhausted,
    NotFound,
    StorageUnavailable,
    InvalidInput,
}

impl ErrorKind {
    /// Whether repeating the whole request later may succeed.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            ErrorKind::AliasSpaceExhausted | ErrorKind::StorageUnavailable
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::AliasExists => "alias_exists",
            ErrorKind::AliasSpaceExhausted => "alias_space_exhausted",
            ErrorKind::NotFound => "not_found",
            ErrorKind::StorageUnavailable => "storage_unavailable",
            ErrorKind::InvalidInput => "invalid_input",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::AliasExists(_) => ErrorKind::AliasExists,
            StoreError::AliasSpaceExhausted { .. } => ErrorKind::AliasSpaceExhausted,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            StoreError::EmptyUrl | StoreError::InvalidAlias(_) | StoreError::InvalidSettings(_) => {
                ErrorKind::InvalidInput
            }
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(alias) => StoreError::AliasExists(alias),
            other => StoreError::StorageUnavailable(other),
        }
    }
}
