//! Inertial mood model
//!
//! Mood is never set directly. Each cycle every value moves a fixed fraction
//! of the way toward a target derived from needs, personality and context,
//! which gives gradual shifts instead of jumps.

use serde::{Deserialize, Serialize};

use crate::core::types::clamp_percent;
use crate::entity::needs::Needs;
use crate::entity::personality::Personality;

/// Smoothing factors: fraction of the gap to the target closed per cycle
pub mod smoothing {
    pub const HAPPINESS: f32 = 0.1;
    pub const STRESS: f32 = 0.15;
    pub const ENERGY: f32 = 0.2;
    pub const MOTIVATION: f32 = 0.1;
}

/// Four emotional values, each on a 0..=100 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    pub happiness: f32,
    pub stress: f32,
    pub energy: f32,
    pub motivation: f32,
}

impl Default for Mood {
    fn default() -> Self {
        Self {
            happiness: 60.0,
            stress: 20.0,
            energy: 80.0,
            motivation: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodKey {
    Happiness,
    Stress,
    Energy,
    Motivation,
}

impl MoodKey {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "happiness" => Some(MoodKey::Happiness),
            "stress" => Some(MoodKey::Stress),
            "energy" => Some(MoodKey::Energy),
            "motivation" => Some(MoodKey::Motivation),
            _ => None,
        }
    }
}

/// External context feeding the mood update
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodContext {
    /// City threat level, 0..=100
    pub threat_level: f32,
    pub employed: bool,
}

/// Additive change applied by life events
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodDelta {
    pub happiness: f32,
    pub stress: f32,
    pub energy: f32,
    pub motivation: f32,
}

impl Mood {
    pub fn get(&self, key: MoodKey) -> f32 {
        match key {
            MoodKey::Happiness => self.happiness,
            MoodKey::Stress => self.stress,
            MoodKey::Energy => self.energy,
            MoodKey::Motivation => self.motivation,
        }
    }

    /// Move each value toward its target for one cycle
    pub fn update(&mut self, needs: &Needs, personality: &Personality, ctx: &MoodContext) {
        let satisfaction = needs.satisfaction();
        let contentment = personality.contentment;

        let target_happiness = satisfaction * (0.7 + contentment * 0.3);
        self.happiness += (target_happiness - self.happiness) * smoothing::HAPPINESS;

        let target_stress = ((100.0 - satisfaction).max(0.0) * 0.5
            + ctx.threat_level * (1.0 - contentment) * 0.3)
            .min(100.0);
        self.stress += (target_stress - self.stress) * smoothing::STRESS;

        let employment_drain = if ctx.employed { 20.0 } else { 0.0 };
        let target_energy = (100.0 - self.stress * 0.3 - employment_drain).max(20.0);
        self.energy += (target_energy - self.energy) * smoothing::ENERGY;

        let target_motivation = needs.purpose * 0.6 + personality.ambition * 40.0;
        self.motivation += (target_motivation - self.motivation) * smoothing::MOTIVATION;

        self.clamp();
    }

    pub fn apply(&mut self, delta: &MoodDelta) {
        self.happiness += delta.happiness;
        self.stress += delta.stress;
        self.energy += delta.energy;
        self.motivation += delta.motivation;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.happiness = clamp_percent(self.happiness);
        self.stress = clamp_percent(self.stress);
        self.energy = clamp_percent(self.energy);
        self.motivation = clamp_percent(self.motivation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_needs() -> Needs {
        Needs {
            food: 90.0,
            shelter: 85.0,
            social: 70.0,
            purpose: 65.0,
            safety: 80.0,
        }
    }

    #[test]
    fn test_happiness_smoothing() {
        let mut mood = Mood {
            happiness: 50.0,
            ..Mood::default()
        };
        let personality = Personality {
            contentment: 0.5,
            ..Personality::default()
        };
        mood.update(&sample_needs(), &personality, &MoodContext::default());
        // target = 78 * 0.85 = 66.3; 50 + 16.3 * 0.1
        assert!((mood.happiness - 51.63).abs() < 1e-3);
    }

    #[test]
    fn test_stress_includes_threat() {
        let mut mood = Mood {
            stress: 0.0,
            ..Mood::default()
        };
        let personality = Personality {
            contentment: 0.0,
            ..Personality::default()
        };
        let ctx = MoodContext {
            threat_level: 100.0,
            employed: false,
        };
        mood.update(&sample_needs(), &personality, &ctx);
        // target = 22 * 0.5 + 100 * 1.0 * 0.3 = 41; 0 + 41 * 0.15
        assert!((mood.stress - 6.15).abs() < 1e-3);
    }

    #[test]
    fn test_energy_uses_updated_stress_and_employment() {
        let mut mood = Mood {
            happiness: 50.0,
            stress: 0.0,
            energy: 50.0,
            motivation: 50.0,
        };
        let personality = Personality {
            contentment: 1.0,
            ..Personality::default()
        };
        let ctx = MoodContext {
            threat_level: 0.0,
            employed: true,
        };
        mood.update(&sample_needs(), &personality, &ctx);
        // stress target = 22 * 0.5 = 11 -> stress = 1.65
        assert!((mood.stress - 1.65).abs() < 1e-3);
        // energy target = 100 - 1.65 * 0.3 - 20 = 79.505 -> 50 + 29.505 * 0.2
        assert!((mood.energy - 55.901).abs() < 1e-3);
    }

    #[test]
    fn test_deprived_citizen_under_threat() {
        let mut mood = Mood {
            stress: 100.0,
            energy: 0.0,
            ..Mood::default()
        };
        let needs = Needs {
            food: 0.0,
            shelter: 0.0,
            social: 0.0,
            purpose: 0.0,
            safety: 0.0,
        };
        let personality = Personality {
            contentment: 0.0,
            ..Personality::default()
        };
        let ctx = MoodContext {
            threat_level: 100.0,
            employed: true,
        };
        mood.update(&needs, &personality, &ctx);
        // stress target = 100 * 0.5 + 100 * 0.3 = 80 -> 100 - 20 * 0.15 = 97
        assert!((mood.stress - 97.0).abs() < 1e-3);
        // energy target = 100 - 29.1 - 20 = 50.9 -> 0 + 50.9 * 0.2
        assert!((mood.energy - 10.18).abs() < 1e-3);
    }

    #[test]
    fn test_motivation_target() {
        let mut mood = Mood {
            motivation: 0.0,
            ..Mood::default()
        };
        let personality = Personality {
            ambition: 1.0,
            ..Personality::default()
        };
        mood.update(&sample_needs(), &personality, &MoodContext::default());
        // target = 65 * 0.6 + 40 = 79 -> 7.9
        assert!((mood.motivation - 7.9).abs() < 1e-4);
    }

    #[test]
    fn test_apply_delta_clamps() {
        let mut mood = Mood::default();
        mood.apply(&MoodDelta {
            happiness: 200.0,
            stress: -200.0,
            energy: 0.0,
            motivation: 5.0,
        });
        assert_eq!(mood.happiness, 100.0);
        assert_eq!(mood.stress, 0.0);
        assert_eq!(mood.motivation, 65.0);
    }
}
