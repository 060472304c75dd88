//! Personality traits, fixed at creation

use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;

/// Five personality dimensions, each in 0.0..=1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub ambition: f32,
    pub sociability: f32,
    pub industriousness: f32,
    pub contentment: f32,
    pub curiosity: f32,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            ambition: 0.5,
            sociability: 0.5,
            industriousness: 0.5,
            contentment: 0.5,
            curiosity: 0.5,
        }
    }
}

impl Personality {
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        Self {
            ambition: rng.random(),
            sociability: rng.random(),
            industriousness: rng.random(),
            contentment: rng.random(),
            curiosity: rng.random(),
        }
    }

    fn dimensions(&self) -> [f32; 5] {
        [
            self.ambition,
            self.sociability,
            self.industriousness,
            self.contentment,
            self.curiosity,
        ]
    }

    /// 1 minus the mean absolute trait difference
    pub fn compatibility(&self, other: &Personality) -> f32 {
        let total: f32 = self
            .dimensions()
            .iter()
            .zip(other.dimensions().iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        1.0 - total / 5.0
    }
}
