//! Behavior configuration with documented constants
//!
//! Tunable knobs for the decision pipeline live here. The closed-form
//! needs and mood coefficients are not configurable; they live next to the
//! formulas in `entity::needs` and `entity::mood`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{CivicError, Result};

/// Configuration for the behavior systems
///
/// Every field has a default, so a TOML file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    // === HISTORY ===
    /// Maximum history entries kept per citizen
    ///
    /// Oldest entries are evicted first once the buffer is full.
    pub history_capacity: usize,

    /// How many of the most recent entries count toward the repetition penalty
    pub repetition_window: usize,

    // === LIFE EVENTS ===
    /// Per-cycle probability that a citizen experiences a life event
    pub life_event_chance: f32,

    // === RELATIONSHIPS ===
    /// Cycles without interaction before a relationship starts to fade
    pub relationship_grace_cycles: u64,

    /// Relationships weaker than this are pruned
    pub relationship_prune_threshold: f32,

    /// Maximum interaction records kept per relationship
    pub interaction_history_cap: usize,

    /// Distance within which two citizens can interact
    pub interaction_radius: f32,

    /// Base chance of a casual interaction, scaled by sociability
    pub interaction_chance: f32,

    // === MOVEMENT ===
    /// Base movement speed in world units per cycle
    ///
    /// Scaled up to 2x by urgency and down by energy.
    pub base_speed: f32,

    /// Distance at which a goal counts as reached
    pub arrival_radius: f32,

    /// Share of the previous step that must be gained toward an unchanged target
    ///
    /// Less progress than this (or none at all) marks the citizen as stuck
    /// and triggers a retarget to the first alternative.
    pub stuck_progress_ratio: f32,

    /// Per-axis jitter applied to the steering direction
    pub steering_jitter: f32,

    // === GOALS ===
    /// Number of alternative targets generated around each goal
    pub alternative_count: usize,

    /// Per-axis offset range for alternative targets
    pub alternative_spread: f32,

    /// Radius searched for unclaimed exploration points
    pub explore_radius: f32,

    /// Attempts at finding an unclaimed exploration point before falling back
    pub explore_attempts: usize,

    /// Clearance a point needs from every building to count as unclaimed
    pub explore_clearance: f32,

    // === URGENT FALLBACK ===
    /// Food level below which the citizen heads straight for food
    pub emergency_food_threshold: f32,

    /// Safety level below which the citizen heads straight home
    pub emergency_safety_threshold: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            repetition_window: 10,

            life_event_chance: 0.02,

            relationship_grace_cycles: 7,
            relationship_prune_threshold: 10.0,
            interaction_history_cap: 20,
            interaction_radius: 3.0,
            interaction_chance: 0.3,

            base_speed: 0.5,
            arrival_radius: 1.0,
            stuck_progress_ratio: 0.5,
            steering_jitter: 0.05,

            alternative_count: 3,
            alternative_spread: 3.0,
            explore_radius: 10.0,
            explore_attempts: 8,
            explore_clearance: 1.5,

            emergency_food_threshold: 10.0,
            emergency_safety_threshold: 15.0,
        }
    }
}

impl BehaviorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text, filling unspecified fields with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(CivicError::InvalidConfig(
                "history_capacity must be at least 1".into(),
            ));
        }

        if self.repetition_window > self.history_capacity {
            return Err(CivicError::InvalidConfig(format!(
                "repetition_window ({}) should be <= history_capacity ({})",
                self.repetition_window, self.history_capacity
            )));
        }

        if !(0.0..=1.0).contains(&self.life_event_chance) {
            return Err(CivicError::InvalidConfig(format!(
                "life_event_chance ({}) must be within 0..=1",
                self.life_event_chance
            )));
        }

        if !(0.0..=1.0).contains(&self.interaction_chance) {
            return Err(CivicError::InvalidConfig(format!(
                "interaction_chance ({}) must be within 0..=1",
                self.interaction_chance
            )));
        }

        if self.base_speed <= 0.0 || self.arrival_radius <= 0.0 {
            return Err(CivicError::InvalidConfig(
                "base_speed and arrival_radius must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.stuck_progress_ratio) {
            return Err(CivicError::InvalidConfig(format!(
                "stuck_progress_ratio ({}) must be within 0..=1",
                self.stuck_progress_ratio
            )));
        }

        if self.relationship_prune_threshold < 0.0 || self.relationship_prune_threshold > 100.0 {
            return Err(CivicError::InvalidConfig(format!(
                "relationship_prune_threshold ({}) must be within 0..=100",
                self.relationship_prune_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BehaviorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BehaviorConfig::from_toml_str("life_event_chance = 0.5\n").unwrap();
        assert!((config.life_event_chance - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.repetition_window, 10);
    }

    #[test]
    fn test_rejects_window_larger_than_capacity() {
        let result = BehaviorConfig::from_toml_str("history_capacity = 5\nrepetition_window = 10\n");
        assert!(matches!(result, Err(CivicError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = BehaviorConfig::from_toml_str("history_capacity = \"lots\"");
        assert!(matches!(result, Err(CivicError::TomlError(_))));
    }
}
