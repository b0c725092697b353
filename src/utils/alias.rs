use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{rngs::StdRng, Rng, SeedableRng};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random alias generator backed by an owned PRNG, seeded once at
/// construction.
///
/// Makes no uniqueness guarantee; the store's constraint catches collisions
/// and the caller regenerates. Not cryptographically secure, so aliases are
/// identifiers, not unguessable tokens.
pub struct AliasGenerator {
    rng: Mutex<StdRng>,
}

impl AliasGenerator {
    /// Creates a generator seeded from the current time.
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();

        Self::with_seed(seed)
    }

    /// Creates a generator with a fixed seed, for deterministic output.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generates an alias of exactly `length` characters, each drawn
    /// independently and uniformly from `A-Z`, `a-z`, `0-9`.
    pub fn generate(&self, length: usize) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        (0..length)
            .map(|_| {
                let idx = rng.random_range(0..ALPHABET.len());
                ALPHABET[idx] as char
            })
            .collect()
    }
}

impl Default for AliasGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_exact_length() {
        let generator = AliasGenerator::new();

        for length in [0, 1, 6, 32] {
            assert_eq!(generator.generate(length).len(), length);
        }
    }

    #[test]
    fn test_generates_only_alphabet_characters() {
        let generator = AliasGenerator::new();

        let alias = generator.generate(256);
        assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let a = AliasGenerator::with_seed(42);
        let b = AliasGenerator::with_seed(42);

        assert_eq!(a.generate(16), b.generate(16));
    }

    #[test]
    fn test_sequence_advances_between_calls() {
        let generator = AliasGenerator::with_seed(42);

        assert_ne!(generator.generate(16), generator.generate(16));
    }
}
