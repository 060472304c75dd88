//! Immutable per-cycle view of the city shared by every consumer
//!
//! Decision, goal and mood code never touch the zoning, economy or event
//! simulations directly; they read this view.

use serde::{Deserialize, Serialize};

use crate::city::ledger::ResourceLedger;
use crate::city::snapshot::BuildingSnapshot;
use crate::core::calendar::WorldClock;
use crate::core::types::{clamp_percent, BuildingId};

/// Extra threat added when the food stock cannot cover one unit per citizen
pub const FOOD_SCARCITY_THREAT: f32 = 10.0;

/// City-wide events currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CityEventKind {
    Festival,
    Disaster,
    CrimeWave,
    Epidemic,
    EconomicBoom,
    Recession,
}

impl CityEventKind {
    /// How much this event shifts the perceived threat level
    pub fn threat_contribution(&self) -> f32 {
        match self {
            CityEventKind::Festival => -10.0,
            CityEventKind::Disaster => 40.0,
            CityEventKind::CrimeWave => 25.0,
            CityEventKind::Epidemic => 20.0,
            CityEventKind::EconomicBoom => -5.0,
            CityEventKind::Recession => 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CityView<'a> {
    pub clock: WorldClock,
    pub buildings: &'a [BuildingSnapshot],
    pub resources: &'a ResourceLedger,
    pub events: &'a [CityEventKind],
    /// Threat reported by the host, 0..=100, before event adjustments
    pub base_threat: f32,
}

impl<'a> CityView<'a> {
    pub fn new(
        clock: WorldClock,
        buildings: &'a [BuildingSnapshot],
        resources: &'a ResourceLedger,
        events: &'a [CityEventKind],
    ) -> Self {
        Self {
            clock,
            buildings,
            resources,
            events,
            base_threat: 0.0,
        }
    }

    pub fn with_base_threat(mut self, threat: f32) -> Self {
        self.base_threat = threat;
        self
    }

    /// Threat level after city events and food scarcity, clamped to 0..=100
    pub fn effective_threat(&self, population: usize) -> f32 {
        let events: f32 = self.events.iter().map(|e| e.threat_contribution()).sum();
        let scarcity = if self.resources.contains("food")
            && self.resources.get("food") < population as f32
        {
            FOOD_SCARCITY_THREAT
        } else {
            0.0
        };
        clamp_percent(self.base_threat + events + scarcity)
    }

    pub fn building(&self, id: BuildingId) -> Option<&'a BuildingSnapshot> {
        self.buildings.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_threat_sums_events() {
        let ledger = ResourceLedger::new();
        let events = [CityEventKind::Disaster, CityEventKind::Festival];
        let view = CityView::new(WorldClock::default(), &[], &ledger, &events).with_base_threat(20.0);
        assert!((view.effective_threat(10) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_effective_threat_is_clamped() {
        let ledger = ResourceLedger::new();
        let events = [CityEventKind::Festival];
        let view = CityView::new(WorldClock::default(), &[], &ledger, &events);
        assert_eq!(view.effective_threat(10), 0.0);

        let events = [CityEventKind::Disaster, CityEventKind::Disaster, CityEventKind::CrimeWave];
        let view = CityView::new(WorldClock::default(), &[], &ledger, &events);
        assert_eq!(view.effective_threat(10), 100.0);
    }

    #[test]
    fn test_food_scarcity_raises_threat() {
        let ledger = ResourceLedger::new().with("food", 3.0);
        let view = CityView::new(WorldClock::default(), &[], &ledger, &[]);
        assert_eq!(view.effective_threat(10), FOOD_SCARCITY_THREAT);
        assert_eq!(view.effective_threat(2), 0.0);
    }
}
