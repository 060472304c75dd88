pub mod action_select;
pub mod community;
pub mod goal;
pub mod history;
pub mod life_events;
pub mod movement;
pub mod rule_eval;
pub mod social;
pub mod tick;

pub use action_select::select_pattern;
pub use community::CommunityMood;
pub use goal::{AlternativeTarget, GoalPurpose, PathfindingGoal};
pub use history::{BehaviorHistory, BehaviorHistoryEntry};
pub use life_events::roll_life_event;
pub use movement::{step_toward, MovementOutcome, MovementTrack};
pub use rule_eval::evaluate_patterns;
pub use social::{decay_relationships, resolve_interaction};
pub use tick::{CycleEvent, CycleReport, SimulationContext};
