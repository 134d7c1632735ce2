use crate::Generator;
use burrow_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// A short code generator using a sequential counter.
///
/// Codes are the prefix followed by the zero-padded counter, cut to the
/// requested length: with prefix `"s"` and length 5 it yields `"s0000"`,
/// `"s0001"`, and so on. The counter wraps once it no longer fits, so
/// codes repeat after `10^(length - prefix)` calls.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&self, length: usize) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);

        let prefix: String = self.prefix.chars().take(length).collect();
        let width = length - prefix.chars().count();
        if width == 0 {
            return ShortCode::new_unchecked(prefix);
        }

        let count = match u32::try_from(width).ok().and_then(|w| 10u64.checked_pow(w)) {
            Some(modulus) => count % modulus,
            None => count,
        };
        ShortCode::new_unchecked(format!("{prefix}{count:0width$}"))
    }
}
