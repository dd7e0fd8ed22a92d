//! Alias generators for the shortcut store.
//!
//! Generators are pure: they never look at stored data. Collisions with
//! existing aliases are the store's problem, resolved by its retry loop.

pub mod error;
pub mod random;
pub mod seq;

pub use error::GeneratorError;
pub use random::{
    random_alias, RandomGenerator, RandomGeneratorSettings, ALPHABET, DEFAULT_ALIAS_LENGTH,
};
pub use seq::SeqGenerator;

use shortcut_core::Alias;

/// Trait for generating candidate aliases.
///
/// Implementations can vary from random strings to sequential counters.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<Alias>;

    /// Produces the next candidate alias.
    fn generate(&self) -> Self::Output;
}
