pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use burrow_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness across calls is not promised; the record store checks every
/// generated code against the codes it already holds.
pub trait Generator: Send + Sync + 'static {
    /// Generates a short code of exactly `length` characters.
    fn generate(&self, length: usize) -> ShortCode;
}
