//! Seeded workload generators shared by tests, benches and the dev binary.
//! A deliberately small alphabet keeps match density high so fixture scans
//! exercise the failure links and the segmenter rather than skating over
//! unmatched input.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const ALPHABET: &[u8] = b"abcd";

/// Generate `count` patterns of length 1..=max_len over the fixture alphabet.
/// The same seed always yields the same patterns.
pub fn generate_patterns(seed: u64, count: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let max_len = max_len.max(1);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(1..=max_len);
            (0..len)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
                .collect()
        })
        .collect()
}

/// Generate an input of `len` symbols over the fixture alphabet.
pub fn generate_text(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}
