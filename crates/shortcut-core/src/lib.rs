//! Core types and traits for the shortcut alias storage engine.
//!
//! This crate defines the vocabulary shared by the generator, the storage
//! backends and the store service: the [`Alias`] key, the persisted
//! [`MappingRecord`], the [`Repository`] contract a storage medium fulfils and
//! the [`AliasStore`] contract callers program against.

pub mod alias;
pub mod error;
pub mod repository;
pub mod store;

pub use alias::Alias;
pub use error::{CoreError, ErrorKind, StorageError, StoreError};
pub use repository::{MappingId, MappingRecord, Repository};
pub use store::{AliasStore, CreateParams, CreatedMapping};
