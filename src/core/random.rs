//! Injectable randomness
//!
//! Every stochastic step in the pipeline draws from a `RandomSource` passed
//! down the call chain. Only the top-level caller decides whether that is a
//! seeded generator or a scripted sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform numbers in [0, 1)
pub trait RandomSource {
    fn random(&mut self) -> f32;

    /// Uniform value in [lo, hi)
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.random() * (hi - lo)
    }

    /// Uniform index into a collection of `len` items (`len` must be non-zero)
    fn pick_index(&mut self, len: usize) -> usize {
        ((self.random() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Bernoulli trial
    fn chance(&mut self, probability: f32) -> bool {
        self.random() < probability
    }
}

/// Reproducible generator backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Raw bytes for identifiers
    pub fn bytes(&mut self) -> [u8; 16] {
        self.rng.gen()
    }
}

impl RandomSource for SeededRandom {
    fn random(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}

/// Replays a fixed sequence of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns the same value
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn random(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
