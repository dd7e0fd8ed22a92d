use crate::error::GeneratorError;
use crate::Generator;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shortcut_core::Alias;
use std::sync::LazyLock;
use typed_builder::TypedBuilder;

/// The 62 characters an alias is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Alias length used when nothing else is configured.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Process-wide source, seeded from OS entropy on first use and never reseeded.
static SHARED_RNG: LazyLock<Mutex<StdRng>> = LazyLock::new(|| Mutex::new(StdRng::from_entropy()));

fn fill_alias<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns `length` characters drawn uniformly and independently from [`ALPHABET`].
///
/// A `length` of zero yields an empty string.
pub fn random_alias(length: usize) -> String {
    let mut rng = SHARED_RNG.lock();
    fill_alias(&mut *rng, length)
}

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Number of characters in each generated alias.
    #[builder(default = DEFAULT_ALIAS_LENGTH)]
    pub length: usize,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

enum Source {
    Shared,
    Seeded(Mutex<StdRng>),
}

/// Fixed-length random alias generator.
///
/// By default every instance draws from the same process-wide source, so
/// generators built in the same instant still produce independent output.
pub struct RandomGenerator {
    length: usize,
    source: Source,
}

impl RandomGenerator {
    /// Creates a generator backed by the process-wide random source.
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, GeneratorError> {
        Self::with_source(settings, Source::Shared)
    }

    /// Creates a generator with a private, deterministic source.
    ///
    /// Two generators seeded alike yield the same sequence.
    pub fn seeded(settings: RandomGeneratorSettings, seed: u64) -> Result<Self, GeneratorError> {
        Self::with_source(
            settings,
            Source::Seeded(Mutex::new(StdRng::seed_from_u64(seed))),
        )
    }

    fn with_source(
        settings: RandomGeneratorSettings,
        source: Source,
    ) -> Result<Self, GeneratorError> {
        if settings.length == 0 {
            return Err(GeneratorError::InvalidLength {
                length: settings.length,
            });
        }

        Ok(Self {
            length: settings.length,
            source,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn next_alias(&self) -> String {
        match &self.source {
            Source::Shared => random_alias(self.length),
            Source::Seeded(rng) => fill_alias(&mut *rng.lock(), self.length),
        }
    }
}

impl std::fmt::Debug for RandomGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match self.source {
            Source::Shared => "shared",
            Source::Seeded(_) => "seeded",
        };
        f.debug_struct("RandomGenerator")
            .field("length", &self.length)
            .field("source", &source)
            .finish()
    }
}

impl Generator for RandomGenerator {
    type Output = Alias;

    fn generate(&self) -> Self::Output {
        Alias::new_unchecked(self.next_alias())
    }
}
