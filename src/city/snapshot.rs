//! Read-only building snapshots supplied by the zoning simulation

use serde::{Deserialize, Serialize};

use crate::core::types::{BuildingId, Vec2};

/// Type of building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
    Office,
    Farm,
    Market,
    Park,
    Civic,
}

impl BuildingKind {
    /// Places that sell or grow food
    pub fn is_food_source(&self) -> bool {
        matches!(self, BuildingKind::Farm | BuildingKind::Market)
    }

    /// Places that employ citizens
    pub fn is_workplace(&self) -> bool {
        matches!(
            self,
            BuildingKind::Commercial
                | BuildingKind::Industrial
                | BuildingKind::Office
                | BuildingKind::Farm
                | BuildingKind::Market
        )
    }

    /// Places citizens gather socially
    pub fn is_social_hub(&self) -> bool {
        matches!(
            self,
            BuildingKind::Park | BuildingKind::Commercial | BuildingKind::Civic
        )
    }

    pub fn is_residence(&self) -> bool {
        matches!(self, BuildingKind::Residential)
    }
}

/// Maintenance state reported by the decay simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingCondition {
    Excellent,
    Good,
    Fair,
    Poor,
    Derelict,
}

/// A single building as seen by the behavior core for one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSnapshot {
    pub id: BuildingId,
    pub kind: BuildingKind,
    pub position: Vec2,
    pub level: u32,
    pub workers: u32,
    pub condition: BuildingCondition,
    /// 0.0..=1.0 share of utilities (power, water) actually delivered
    pub utility_efficiency: f32,
}

impl BuildingSnapshot {
    pub fn new(id: BuildingId, kind: BuildingKind, position: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            level: 1,
            workers: 0,
            condition: BuildingCondition::Good,
            utility_efficiency: 1.0,
        }
    }

    pub fn with_workers(mut self, workers: u32) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_condition(mut self, condition: BuildingCondition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_utility_efficiency(mut self, efficiency: f32) -> Self {
        self.utility_efficiency = efficiency.clamp(0.0, 1.0);
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }
}
