//! Direct steering toward a goal
//!
//! No obstacle avoidance: each tick the citizen takes one step along the
//! straight line to its target. A citizen within the arrival radius stays
//! put. Past that, a citizen that closed less than a fraction of its previous
//! step toward an unchanged target is considered stuck and switches to the
//! goal's best alternative.

use serde::{Deserialize, Serialize};

use crate::core::config::BehaviorConfig;
use crate::core::random::RandomSource;
use crate::core::types::Vec2;
use crate::entity::citizen::Citizen;
use crate::simulation::goal::PathfindingGoal;

/// Last observed distance to a target, used for stuck detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementTrack {
    pub target: Vec2,
    pub distance: f32,
    /// Length of the step taken from that distance
    pub step: f32,
}

impl MovementTrack {
    /// Whether the citizen gained too little ground since this track was taken
    pub fn stalled(&self, target: Vec2, distance: f32, ratio: f32) -> bool {
        if self.target != target {
            return false;
        }
        let progress = self.distance - distance;
        progress <= 0.0 || progress < self.step * ratio
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementOutcome {
    /// Within the arrival radius; no movement
    Arrived,
    Moved { step: f32 },
    /// Stuck; the goal now points at its best alternative
    Replanned,
}

/// Step length for a given urgency and energy
pub fn movement_speed(base_speed: f32, urgency: f32, energy: f32) -> f32 {
    base_speed * (1.0 + urgency / 100.0) * (energy / 100.0)
}

pub fn step_toward(
    citizen: &mut Citizen,
    goal: &mut PathfindingGoal,
    track: &mut Option<MovementTrack>,
    config: &BehaviorConfig,
    rng: &mut dyn RandomSource,
) -> MovementOutcome {
    let distance = citizen.location.distance(&goal.target);

    if distance <= config.arrival_radius {
        *track = None;
        return MovementOutcome::Arrived;
    }

    if let Some(previous) = *track {
        let stalled = previous.stalled(goal.target, distance, config.stuck_progress_ratio);
        if stalled && goal.promote_alternative() {
            tracing::trace!(citizen = %citizen.id, "Stuck, switching to alternative target");
            *track = None;
            return MovementOutcome::Replanned;
        }
    }

    let speed = movement_speed(config.base_speed, goal.urgency, citizen.mood.energy);
    let jitter = config.steering_jitter;
    let direction = (goal.target - citizen.location).normalize()
        + Vec2::new(rng.range(-jitter, jitter), rng.range(-jitter, jitter));
    let step = direction * speed;
    citizen.location = citizen.location + step;

    let step = step.length();
    *track = Some(MovementTrack {
        target: goal.target,
        distance,
        step,
    });

    MovementOutcome::Moved { step }
}
