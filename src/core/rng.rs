//! Seeded random source shared by every subsystem
//!
//! A single `SimRng` advances through a whole day so that a fixed seed
//! reproduces the same sequence of events, fights and arrivals.

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct SimRng {
    rng: ChaCha8Rng,
}

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform real in `[0, 1)`
    pub fn uniform(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Uniform real in `[lo, hi]`
    pub fn uniform_range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform integer in `[lo, hi]`
    pub fn int_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Bernoulli trial: true with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.uniform() < p
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Pick one item with probability proportional to its weight.
    /// Returns None when the slice is empty or no weight is positive.
    pub fn weighted_choice<'a, T>(&mut self, items: &'a [(T, f32)]) -> Option<&'a T> {
        let dist = WeightedIndex::new(items.iter().map(|&(_, w)| w.max(0.0))).ok()?;
        Some(&items[dist.sample(&mut self.rng)].0)
    }

    /// `amount` distinct indices from `0..len`, in sampled order
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }
}
