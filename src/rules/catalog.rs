//! Behavior pattern catalog and the built-in rule set

use crate::entity::mood::MoodKey;
use crate::entity::needs::NeedKey;
use crate::rules::pattern::{
    ActionKind, BehaviorPattern, Comparison, Condition, PatternAction, TargetKind,
};

/// Immutable, ordered list of behavior patterns
///
/// Declaration order is significant: it breaks priority ties during
/// evaluation.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    patterns: Vec<BehaviorPattern>,
}

impl PatternCatalog {
    pub fn new(patterns: Vec<BehaviorPattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[BehaviorPattern] {
        &self.patterns
    }

    pub fn get(&self, id: &str) -> Option<&BehaviorPattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Report duplicate ids and patterns without actions
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (i, pattern) in self.patterns.iter().enumerate() {
            if self.patterns[..i].iter().any(|p| p.id == pattern.id) {
                errors.push(format!("Duplicate pattern id '{}'", pattern.id));
            }
            if pattern.actions.is_empty() {
                errors.push(format!("Pattern '{}' has no actions", pattern.id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The default rule set shipped with the game
    pub fn builtin() -> Self {
        use Comparison::*;

        Self::new(vec![
            BehaviorPattern::new("seek_food", "Find Food", 80)
                .when(Condition::need(NeedKey::Food, Less, 40.0))
                .then(
                    PatternAction::new(ActionKind::SeekFood)
                        .toward(TargetKind::NearestFoodSource)
                        .lasting(1),
                )
                .with_cooldown(2)
                .with_variance(0.2),
            BehaviorPattern::new("seek_shelter", "Seek Shelter", 75)
                .when(Condition::need(NeedKey::Shelter, Less, 30.0))
                .then(PatternAction::new(ActionKind::SeekShelter).toward(TargetKind::RestLocation))
                .with_cooldown(4)
                .with_variance(0.1),
            BehaviorPattern::new("rest_when_tired", "Rest", 70)
                .when(Condition::mood(MoodKey::Energy, Less, 25.0))
                .then(
                    PatternAction::new(ActionKind::Rest)
                        .toward(TargetKind::RestLocation)
                        .lasting(6),
                )
                .with_cooldown(6)
                .with_variance(0.1),
            BehaviorPattern::new("night_rest", "Turn In For The Night", 65)
                .when(Condition::hour(GreaterOrEqual, 22.0))
                .then(
                    PatternAction::new(ActionKind::Rest)
                        .toward(TargetKind::RestLocation)
                        .lasting(8),
                )
                .with_variance(0.05),
            BehaviorPattern::new("commute_to_work", "Go To Work", 60)
                .when(Condition::hour(GreaterOrEqual, 8.0))
                .when(Condition::hour(Less, 17.0))
                .when(Condition::need(NeedKey::Purpose, Less, 80.0))
                .then(
                    PatternAction::new(ActionKind::Work)
                        .toward(TargetKind::OptimalWorkplace)
                        .lasting(8),
                )
                .with_cooldown(1)
                .with_variance(0.3),
            BehaviorPattern::new("work_with_friends", "Work Alongside Colleagues", 55)
                .when(Condition::hour(GreaterOrEqual, 8.0))
                .when(Condition::hour(Less, 17.0))
                .when(Condition::relationships(GreaterOrEqual, 2.0))
                .then(
                    PatternAction::new(ActionKind::Work)
                        .toward(TargetKind::WorkplaceWithColleagues)
                        .lasting(8),
                )
                .with_variance(0.3),
            BehaviorPattern::new("socialize", "Meet Friends", 50)
                .when(Condition::need(NeedKey::Social, Less, 50.0))
                .when(Condition::mood(MoodKey::Energy, Greater, 30.0))
                .then(
                    PatternAction::new(ActionKind::Socialize)
                        .toward(TargetKind::SocialHub)
                        .lasting(2),
                )
                .then(PatternAction::new(ActionKind::Relax).toward(TargetKind::SocialHub))
                .with_cooldown(3)
                .with_variance(0.4),
            BehaviorPattern::new("unwind", "Unwind After Stress", 45)
                .when(Condition::mood(MoodKey::Stress, Greater, 60.0))
                .then(
                    PatternAction::new(ActionKind::Relax)
                        .toward(TargetKind::SocialHub)
                        .lasting(2),
                )
                .with_cooldown(2)
                .with_variance(0.3),
            BehaviorPattern::new("evening_out", "Evening Out", 40)
                .when(Condition::hour(GreaterOrEqual, 18.0))
                .when(Condition::hour(Less, 22.0))
                .when(Condition::relationships(GreaterOrEqual, 1.0))
                .then(
                    PatternAction::new(ActionKind::Socialize)
                        .toward(TargetKind::SocialHub)
                        .lasting(3),
                )
                .with_variance(0.5),
        ])
    }
}
