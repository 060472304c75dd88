//! Community-wide mood aggregate

use serde::{Deserialize, Serialize};

use crate::entity::citizen::Citizen;

/// Value reported for every field when there is nobody to average
pub const NEUTRAL_MOOD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommunityMood {
    pub happiness: f32,
    pub stress: f32,
    /// Mean over citizens of the mean of all five needs
    pub satisfaction: f32,
}

impl Default for CommunityMood {
    fn default() -> Self {
        Self {
            happiness: NEUTRAL_MOOD,
            stress: NEUTRAL_MOOD,
            satisfaction: NEUTRAL_MOOD,
        }
    }
}

impl CommunityMood {
    pub fn from_citizens(citizens: &[Citizen]) -> Self {
        if citizens.is_empty() {
            return Self::default();
        }
        let n = citizens.len() as f32;
        let (happiness, stress, satisfaction) =
            citizens.iter().fold((0.0, 0.0, 0.0), |(h, s, sat), c| {
                (h + c.mood.happiness, s + c.mood.stress, sat + c.needs.satisfaction())
            });
        Self {
            happiness: happiness / n,
            stress: stress / n,
            satisfaction: satisfaction / n,
        }
    }
}
