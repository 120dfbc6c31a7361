//! Random sources used by the wish engine

use crate::error::RngError;

/// Minimal capability the wish engine needs from a random source.
///
/// Implementations return a uniformly distributed integer in `low..=high`
/// and must report an empty range as an error rather than panic.
pub trait WishRng {
    fn uniform_inclusive(&mut self, low: u32, high: u32) -> Result<u32, RngError>;
}

impl<R: WishRng + ?Sized> WishRng for &mut R {
    #[inline]
    fn uniform_inclusive(&mut self, low: u32, high: u32) -> Result<u32, RngError> {
        (**self).uniform_inclusive(low, high)
    }
}

/// Fast RNG wrapper for the simulation hot loop
#[derive(Clone)]
pub struct FastRng {
    inner: fastrand::Rng,
}

impl FastRng {
    #[inline(always)]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: fastrand::Rng::with_seed(seed),
        }
    }

    /// Seeded from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }
}

impl WishRng for FastRng {
    #[inline(always)]
    fn uniform_inclusive(&mut self, low: u32, high: u32) -> Result<u32, RngError> {
        if low > high {
            return Err(RngError::EmptyRange { low, high });
        }
        Ok(self.inner.u32(low..=high))
    }
}

/// Derive an independent seed for one trial from a base seed (SplitMix64 finaliser)
pub fn trial_seed(base_seed: u64, trial: u64) -> u64 {
    let mut z = base_seed
        .wrapping_add(trial.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_rng_stays_in_range() {
        let mut rng = FastRng::new(7);
        for _ in 0..10_000 {
            let v = rng.uniform_inclusive(0, 100).unwrap();
            assert!(v <= 100);
        }
    }

    #[test]
    fn test_fast_rng_hits_both_ends() {
        let mut rng = FastRng::new(99);
        let mut seen = [false; 2];
        for _ in 0..1_000 {
            seen[rng.uniform_inclusive(0, 1).unwrap() as usize] = true;
        }
        assert!(seen[0] && seen[1]);
    }

    #[test]
    fn test_empty_range_is_an_error() {
        let mut fast = FastRng::new(1);
        assert_eq!(
            fast.uniform_inclusive(5, 4),
            Err(RngError::EmptyRange { low: 5, high: 4 })
        );
        assert!(fast.uniform_inclusive(10, 0).is_err());
        assert_eq!(fast.uniform_inclusive(3, 3), Ok(3));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = FastRng::new(1234);
        let mut b = FastRng::new(1234);
        for _ in 0..100 {
            assert_eq!(
                a.uniform_inclusive(0, 999).unwrap(),
                b.uniform_inclusive(0, 999).unwrap()
            );
        }
    }

    #[test]
    fn test_trial_seeds_are_distinct() {
        let seeds: std::collections::HashSet<u64> = (0..1_000).map(|i| trial_seed(42, i)).collect();
        assert_eq!(seeds.len(), 1_000);
        assert_ne!(trial_seed(1, 0), trial_seed(2, 0));
    }
}
