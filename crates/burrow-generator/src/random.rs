use crate::Generator;
use burrow_core::ShortCode;
use rand::Rng;

/// Letters and digits, the default code alphabet.
pub const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Draws every character of a code uniformly from a fixed alphabet.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    alphabet: Vec<char>,
}

impl RandomGenerator {
    /// Creates a generator over [`ALPHANUMERIC`].
    pub fn new() -> Self {
        Self {
            alphabet: ALPHANUMERIC.chars().collect(),
        }
    }

    /// Creates a generator over a custom alphabet.
    ///
    /// Returns `None` if the alphabet is empty.
    pub fn with_alphabet(alphabet: &str) -> Option<Self> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return None;
        }
        Some(Self { alphabet })
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self, length: usize) -> ShortCode {
        let mut rng = rand::rng();
        let code: String = (0..length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect();
        ShortCode::new_unchecked(code)
    }
}
