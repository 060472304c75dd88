//! Homeostatic needs that drive citizen behavior

use serde::{Deserialize, Serialize};

use crate::core::types::clamp_percent;

/// Five decaying drives, each on a 0..=100 scale (100 = fully satisfied)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    pub food: f32,
    pub shelter: f32,
    pub social: f32,
    pub purpose: f32,
    /// Governed by the city's threat feed rather than by decay
    pub safety: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            food: 80.0,
            shelter: 80.0,
            social: 70.0,
            purpose: 70.0,
            safety: 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeedKey {
    Food,
    Shelter,
    Social,
    Purpose,
    Safety,
}

impl NeedKey {
    pub const ALL: [NeedKey; 5] = [
        NeedKey::Food,
        NeedKey::Shelter,
        NeedKey::Social,
        NeedKey::Purpose,
        NeedKey::Safety,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "food" => Some(NeedKey::Food),
            "shelter" => Some(NeedKey::Shelter),
            "social" => Some(NeedKey::Social),
            "purpose" => Some(NeedKey::Purpose),
            "safety" => Some(NeedKey::Safety),
            _ => None,
        }
    }
}

impl Needs {
    pub fn get(&self, key: NeedKey) -> f32 {
        match key {
            NeedKey::Food => self.food,
            NeedKey::Shelter => self.shelter,
            NeedKey::Social => self.social,
            NeedKey::Purpose => self.purpose,
            NeedKey::Safety => self.safety,
        }
    }

    /// Shift a need by `delta`, clamped to 0..=100
    pub fn adjust(&mut self, key: NeedKey, delta: f32) {
        let slot = match key {
            NeedKey::Food => &mut self.food,
            NeedKey::Shelter => &mut self.shelter,
            NeedKey::Social => &mut self.social,
            NeedKey::Purpose => &mut self.purpose,
            NeedKey::Safety => &mut self.safety,
        };
        *slot = clamp_percent(*slot + delta);
    }

    pub fn set_safety(&mut self, value: f32) {
        self.safety = clamp_percent(value);
    }

    /// Decay needs over one cycle
    ///
    /// Content citizens feel their needs slip more slowly:
    /// `rate = 1 - contentment * 0.3`.
    pub fn decay(&mut self, contentment: f32) {
        let rate = 1.0 - contentment * 0.3;

        self.food = clamp_percent(self.food - 2.0 * rate);
        self.shelter = clamp_percent(self.shelter - 0.5 * rate);
        self.social = clamp_percent(self.social - 1.5 * rate);
        self.purpose = clamp_percent(self.purpose - 1.0 * rate);
    }

    /// Mean of all five needs
    pub fn satisfaction(&self) -> f32 {
        (self.food + self.shelter + self.social + self.purpose + self.safety) / 5.0
    }

    /// Lowest need and its level
    pub fn most_pressing(&self) -> (NeedKey, f32) {
        NeedKey::ALL
            .into_iter()
            .map(|key| (key, self.get(key)))
            .fold((NeedKey::Food, f32::INFINITY), |best, cur| {
                if cur.1 < best.1 { cur } else { best }
            })
    }
}
