//! Storage backends implementing [`shortcut_core::Repository`].

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use shortcut_core::repository::Result;
pub use shortcut_core::{MappingId, MappingRecord, Repository, StorageError};
pub use sqlite::{SqliteRepository, SqliteSettings};
