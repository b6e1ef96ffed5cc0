use std::sync::{Mutex, PoisonError};

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// Length of every generated hash
pub const CODE_LENGTH: usize = 6;

/// 62 symbols: A-Z, a-z, 0-9
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Draws a code of `CODE_LENGTH` characters, each uniformly from `ALPHABET`.
///
/// The result is only a candidate: nothing here checks it against stored
/// hashes.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Thread-safe code generator over a swappable random source.
///
/// Production uses an OS-seeded `StdRng`; tests pass a seeded one to get
/// reproducible codes.
pub struct CodeGenerator<R = StdRng> {
    rng: Mutex<R>,
}

impl CodeGenerator<StdRng> {
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> CodeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn generate(&self) -> String {
        // A panic mid-draw leaves the RNG state usable
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generate_code(&mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn alphabet_has_62_unique_symbols() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
        assert!(ALPHABET.iter().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn codes_have_fixed_length_and_alphabet() {
        let generator = CodeGenerator::from_os_rng();
        for _ in 0..1_000 {
            let code = generator.generate();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{}", code);
        }
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let a = CodeGenerator::seeded(7);
        let b = CodeGenerator::seeded(7);
        let first: Vec<String> = (0..10).map(|_| a.generate()).collect();
        let second: Vec<String> = (0..10).map(|_| b.generate()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = CodeGenerator::seeded(1);
        let b = CodeGenerator::seeded(2);
        let first: Vec<String> = (0..10).map(|_| a.generate()).collect();
        let second: Vec<String> = (0..10).map(|_| b.generate()).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn every_symbol_is_reachable() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            seen.extend(generate_code(&mut rng).chars());
        }
        assert_eq!(seen.len(), ALPHABET.len());
    }
}
