//! Short path generation.

use rand::Rng;

/// Fixed alphabet candidates are drawn from: the Latin letters interleaved
/// by case, then the ten digits.
const ALPHABET: &str = "AaBbCcDdEeFfGgHhIiJjKkLlMmNnOoPpQqRrSsTtUuVvWwXxYyZz0123456789";

/// Shortest and longest primary candidate, inclusive.
const MIN_LENGTH: usize = 2;
const MAX_LENGTH: usize = 5;

/// Length of fallback candidates drawn after repeated collisions.
const FALLBACK_LENGTH: usize = 8;

/// Capability for producing short path candidates.
///
/// Implementations are pure generators with no storage access; uniqueness
/// is the store's job, and the caller retries on collision.
#[cfg_attr(test, mockall::automock)]
pub trait PathGenerator: Send + Sync {
    /// Draws a fresh candidate short path.
    fn generate(&self) -> String;

    /// Draws a candidate from a wider space, used once `generate` keeps
    /// colliding.
    fn generate_fallback(&self) -> String;
}

/// Default generator: a random contiguous slice of [`ALPHABET`].
///
/// Primary candidates are 2-5 characters long and always a substring of the
/// alphabet starting at a random offset, not an independent sample of
/// characters. Overlapping draws are common and the two-character space is
/// tiny, so callers must treat collisions as routine.
#[derive(Debug, Default, Clone)]
pub struct AlphabetSliceGenerator;

impl AlphabetSliceGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl PathGenerator for AlphabetSliceGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        let length = rng.random_range(MIN_LENGTH..=MAX_LENGTH);
        // Offset is bounded so the slice always fits the alphabet.
        let start = rng.random_range(0..=ALPHABET.len() - length);
        ALPHABET[start..start + length].to_string()
    }

    fn generate_fallback(&self) -> String {
        let mut rng = rand::rng();
        let bytes = ALPHABET.as_bytes();
        (0..FALLBACK_LENGTH)
            .map(|_| bytes[rng.random_range(0..bytes.len())] as char)
            .collect()
    }
}
