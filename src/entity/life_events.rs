//! Permanent life event log entries

use serde::{Deserialize, Serialize};

use crate::core::types::Cycle;
use crate::entity::mood::MoodDelta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeEventKind {
    Promotion,
    Illness,
    Friendship,
    Conflict,
    Discovery,
}

impl LifeEventKind {
    pub const ALL: [LifeEventKind; 5] = [
        LifeEventKind::Promotion,
        LifeEventKind::Illness,
        LifeEventKind::Friendship,
        LifeEventKind::Conflict,
        LifeEventKind::Discovery,
    ];

    /// Fixed mood change applied when the event fires
    pub fn mood_delta(&self) -> MoodDelta {
        match self {
            LifeEventKind::Promotion => MoodDelta {
                happiness: 15.0,
                stress: -5.0,
                energy: 0.0,
                motivation: 10.0,
            },
            LifeEventKind::Illness => MoodDelta {
                happiness: -5.0,
                stress: 10.0,
                energy: -25.0,
                motivation: -10.0,
            },
            LifeEventKind::Friendship => MoodDelta {
                happiness: 10.0,
                stress: -5.0,
                energy: 0.0,
                motivation: 5.0,
            },
            LifeEventKind::Conflict => MoodDelta {
                happiness: -10.0,
                stress: 15.0,
                energy: -5.0,
                motivation: -5.0,
            },
            LifeEventKind::Discovery => MoodDelta {
                happiness: 5.0,
                stress: 0.0,
                energy: 5.0,
                motivation: 15.0,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LifeEventKind::Promotion => "promotion",
            LifeEventKind::Illness => "illness",
            LifeEventKind::Friendship => "friendship",
            LifeEventKind::Conflict => "conflict",
            LifeEventKind::Discovery => "discovery",
        }
    }
}

/// One entry in a citizen's life log; never pruned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEventRecord {
    pub cycle: Cycle,
    pub kind: LifeEventKind,
    pub description: String,
    pub mood_delta: MoodDelta,
}
