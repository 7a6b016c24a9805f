use rand::seq::SliceRandom;

use crate::constants::rng::{GOLDEN_GAMMA, MIX_MULTIPLIER_A, MIX_MULTIPLIER_B};
use crate::types::Seed;

/// Small deterministic generator owned by a single splitter invocation.
///
/// The output sequence depends only on the seed, so folds are reproducible
/// regardless of what other splitters run before, after, or alongside.
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create a generator seeded with `seed`.
    pub fn new(seed: Seed) -> Self {
        Self { state: seed }
    }

    /// Current internal state.
    pub fn state(&self) -> u64 {
        self.state
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(GOLDEN_GAMMA);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(MIX_MULTIPLIER_A);
        z = (z ^ (z >> 27)).wrapping_mul(MIX_MULTIPLIER_B);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Uniform random permutation of `0..len`.
pub fn permutation(len: usize, rng: &mut DeterministicRng) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..len).collect();
    perm.shuffle(rng);
    perm
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, RngCore};

    #[test]
    fn same_seed_yields_same_sequence() {
        let mut a = DeterministicRng::new(7);
        let mut b = DeterministicRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = DeterministicRng::new(1);
        let mut b = DeterministicRng::new(2);
        let left: Vec<u64> = (0..4).map(|_| a.next_u64()).collect();
        let right: Vec<u64> = (0..4).map(|_| b.next_u64()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn fill_bytes_handles_partial_words() {
        let mut rng = DeterministicRng::new(3);
        let mut buf = [0_u8; 11];
        rng.fill_bytes(&mut buf);
        assert!(buf.iter().any(|byte| *byte != 0));
        assert_ne!(rng.state(), 3);
    }

    #[test]
    fn permutation_covers_every_position_once() {
        let mut rng = DeterministicRng::new(42);
        let mut perm = permutation(100, &mut rng);
        perm.sort_unstable();
        assert_eq!(perm, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn permutation_of_empty_range_is_empty() {
        let mut rng = DeterministicRng::new(42);
        assert!(permutation(0, &mut rng).is_empty());
    }

    #[test]
    fn permutation_is_reproducible() {
        let first = permutation(50, &mut DeterministicRng::new(9));
        let second = permutation(50, &mut DeterministicRng::new(9));
        assert_eq!(first, second);
    }

    #[test]
    fn random_range_stays_in_bounds() {
        let mut rng = DeterministicRng::new(11);
        for _ in 0..200 {
            let value = rng.random_range(0..5_usize);
            assert!(value < 5);
        }
    }
}
