//! Randomness sources for stochastic decisions.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform draws and shuffling used by every stochastic decision in the
/// simulation.
pub trait RandomSource {
    /// Uniform integer in `[min, max]`; reversed bounds are swapped.
    fn int_in_range(&mut self, min: i32, max: i32) -> i32;

    /// Uniform real in `[min, max)`; reversed bounds are swapped.
    fn real_in_range(&mut self, min: f64, max: f64) -> f64;

    fn shuffle<T>(&mut self, items: &mut [T]);

    /// Roll 1..=100 and succeed when the roll is at most `percent`.
    fn percent_chance(&mut self, percent: u32) -> bool {
        let roll = self.int_in_range(1, 100);
        roll as i64 <= percent as i64
    }

    /// Pick one element uniformly at random.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let last = (items.len() - 1).min(i32::MAX as usize) as i32;
        let index = self.int_in_range(0, last) as usize;
        items.get(index)
    }
}

/// Seeded generator backing a real run
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_in_range(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min > max { (max, min) } else { (min, max) };
        self.rng.gen_range(lo..=hi)
    }

    fn real_in_range(&mut self, min: f64, max: f64) -> f64 {
        let (lo, hi) = if min > max { (max, min) } else { (min, max) };
        if lo == hi {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Deterministic source for scripted scenarios.
///
/// Every draw returns its lower bound and shuffling leaves the order intact,
/// so `choose` always yields the first candidate and `percent_chance`
/// succeeds for any positive percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoice;

impl RandomSource for FirstChoice {
    fn int_in_range(&mut self, min: i32, max: i32) -> i32 {
        min.min(max)
    }

    fn real_in_range(&mut self, min: f64, max: f64) -> f64 {
        min.min(max)
    }

    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::seed_from_u64(42);
        let mut b = SeededRandom::seed_from_u64(42);

        let draws_a: Vec<i32> = (0..32).map(|_| a.int_in_range(0, 1000)).collect();
        let draws_b: Vec<i32> = (0..32).map(|_| b.int_in_range(0, 1000)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let mut rng = SeededRandom::seed_from_u64(7);
        for _ in 0..100 {
            let v = rng.int_in_range(10, -10);
            assert!((-10..=10).contains(&v));

            let r = rng.real_in_range(2.0, 1.0);
            assert!((1.0..2.0).contains(&r));
        }
        assert_eq!(rng.real_in_range(3.0, 3.0), 3.0);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = SeededRandom::seed_from_u64(1);
        let mut items: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_percent_chance_extremes() {
        let mut rng = SeededRandom::seed_from_u64(3);
        for _ in 0..200 {
            assert!(!rng.percent_chance(0));
            assert!(rng.percent_chance(100));
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = SeededRandom::seed_from_u64(9);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());

        let items = [1, 2, 3];
        for _ in 0..50 {
            assert!(items.contains(rng.choose(&items).unwrap()));
        }
    }

    #[test]
    fn test_first_choice_is_scripted() {
        let mut rng = FirstChoice;
        assert!(rng.percent_chance(1));
        assert_eq!(rng.choose(&[7, 8, 9]), Some(&7));

        let mut items = vec![3, 1, 2];
        rng.shuffle(&mut items);
        assert_eq!(items, vec![3, 1, 2]);
    }
}
