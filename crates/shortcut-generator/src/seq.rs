use crate::Generator;
use shortcut_core::Alias;
use std::sync::atomic::{AtomicU64, Ordering};

/// Deterministic generator producing `prefix` followed by a zero-padded counter.
///
/// Output looks like `ln000000`, `ln000001`, ... It never repeats within one
/// instance, which makes it handy for tooling and for tests that need to
/// predict the generated alias.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Starts counting from `offset` instead of zero.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = Alias;

    fn generate(&self) -> Self::Output {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        Alias::new_unchecked(format!("{}{:06}", self.prefix, n))
    }
}
