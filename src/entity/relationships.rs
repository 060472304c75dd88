//! Social relationships between citizens

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{clamp_percent, CitizenId, Cycle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    Family,
    Friend,
    Colleague,
    Rival,
    Romantic,
}

/// How a single interaction went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionOutcome {
    Positive,
    Neutral,
    Negative,
}

impl InteractionOutcome {
    /// Classify by personality compatibility
    pub fn from_compatibility(compatibility: f32) -> Self {
        if compatibility > 0.6 {
            InteractionOutcome::Positive
        } else if compatibility < 0.4 {
            InteractionOutcome::Negative
        } else {
            InteractionOutcome::Neutral
        }
    }

    pub fn strength_delta(&self) -> f32 {
        match self {
            InteractionOutcome::Positive => 3.0,
            InteractionOutcome::Neutral => 0.0,
            InteractionOutcome::Negative => -2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub cycle: Cycle,
    pub outcome: InteractionOutcome,
    pub compatibility: f32,
}

/// One directed relationship from the owning citizen to `target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub target: CitizenId,
    pub relation: RelationType,
    /// 0..=100; relationships below the prune threshold are removed
    pub strength: f32,
    pub last_interaction: Cycle,
    /// Bounded, oldest first
    pub interactions: VecDeque<InteractionRecord>,
}

impl Relationship {
    pub fn new(target: CitizenId, relation: RelationType, strength: f32, cycle: Cycle) -> Self {
        Self {
            target,
            relation,
            strength: clamp_percent(strength),
            last_interaction: cycle,
            interactions: VecDeque::new(),
        }
    }

    pub fn adjust_strength(&mut self, delta: f32) {
        self.strength = clamp_percent(self.strength + delta);
    }

    /// Record an interaction, keeping at most `cap` records
    pub fn record(&mut self, record: InteractionRecord, cap: usize) {
        self.last_interaction = record.cycle;
        self.interactions.push_back(record);
        while self.interactions.len() > cap {
            self.interactions.pop_front();
        }
    }

    pub fn cycles_since_interaction(&self, now: Cycle) -> u64 {
        now.saturating_sub(self.last_interaction)
    }
}
