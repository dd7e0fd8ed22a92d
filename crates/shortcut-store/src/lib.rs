//! The alias store service.
//!
//! [`AliasStoreService`] implements [`shortcut_core::AliasStore`] on top of any
//! [`shortcut_core::Repository`] and [`shortcut_generator::Generator`]. Core
//! types are re-exported for convenience.

pub mod service;
pub mod settings;

pub use service::AliasStoreService;
pub use settings::{StoreSettings, DEFAULT_MAX_ATTEMPTS};
pub use shortcut_core::{
    Alias, AliasStore, CreateParams, CreatedMapping, ErrorKind, StorageError, StoreError,
};
