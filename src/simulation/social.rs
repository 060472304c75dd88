//! Social interactions and relationship decay

use crate::core::config::BehaviorConfig;
use crate::core::random::RandomSource;
use crate::core::types::{CitizenId, Cycle};
use crate::entity::citizen::Citizen;
use crate::entity::personality::Personality;
use crate::entity::relationships::{
    InteractionOutcome, InteractionRecord, RelationType, Relationship,
};

/// Strength of a brand-new acquaintance
pub const INITIAL_STRENGTH: f32 = 20.0;

/// Strength lost per idle cycle past the grace period
pub const DECAY_PER_CYCLE: f32 = 1.0;

/// Result of one interaction, from the initiator's side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionResult {
    pub target: CitizenId,
    pub outcome: InteractionOutcome,
    pub compatibility: f32,
    /// Strength afterward; 0 when the relationship was pruned
    pub strength: f32,
    pub pruned: bool,
}

/// Interact with one of the candidates, picked uniformly
///
/// `personality_of` looks up the other citizen; an unknown target is treated
/// as perfectly average.
pub fn resolve_interaction<F>(
    citizen: &mut Citizen,
    candidates: &[CitizenId],
    personality_of: F,
    cycle: Cycle,
    config: &BehaviorConfig,
    rng: &mut dyn RandomSource,
) -> Option<InteractionResult>
where
    F: Fn(CitizenId) -> Option<Personality>,
{
    if candidates.is_empty() {
        return None;
    }
    let target = candidates[rng.pick_index(candidates.len())];

    let other = personality_of(target).unwrap_or_default();
    let compatibility = citizen.personality.compatibility(&other);
    let outcome = InteractionOutcome::from_compatibility(compatibility);

    if citizen.relationship(target).is_none() {
        citizen.relationships.push(Relationship::new(
            target,
            RelationType::Friend,
            INITIAL_STRENGTH,
            cycle,
        ));
    }

    let index = citizen
        .relationships
        .iter()
        .position(|r| r.target == target)?;
    let relationship = &mut citizen.relationships[index];
    relationship.adjust_strength(outcome.strength_delta());
    relationship.record(
        InteractionRecord {
            cycle,
            outcome,
            compatibility,
        },
        config.interaction_history_cap,
    );
    let strength = relationship.strength;

    let pruned = strength < config.relationship_prune_threshold;
    if pruned {
        citizen.relationships.remove(index);
    }

    tracing::trace!(
        citizen = %citizen.id,
        target = %target,
        ?outcome,
        compatibility,
        "Social interaction"
    );

    Some(InteractionResult {
        target,
        outcome,
        compatibility,
        strength: if pruned { 0.0 } else { strength },
        pruned,
    })
}

/// Weaken idle relationships and drop the ones that fall below the threshold
///
/// Returns the number of relationships removed.
pub fn decay_relationships(citizen: &mut Citizen, now: Cycle, config: &BehaviorConfig) -> usize {
    for relationship in citizen.relationships.iter_mut() {
        if relationship.cycles_since_interaction(now) >= config.relationship_grace_cycles {
            relationship.adjust_strength(-DECAY_PER_CYCLE);
        }
    }

    let before = citizen.relationships.len();
    citizen
        .relationships
        .retain(|r| r.strength >= config.relationship_prune_threshold);
    before - citizen.relationships.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;
    use crate::core::types::Vec2;

    fn id(n: u8) -> CitizenId {
        CitizenId::from_random_bytes([n; 16])
    }

    fn citizen() -> Citizen {
        Citizen::new(id(1), "Social", Vec2::default())
    }

    #[test]
    fn test_first_meeting_creates_friend() {
        let mut c = citizen();
        let mut rng = ScriptedRandom::constant(0.0);
        let config = BehaviorConfig::default();

        let result = resolve_interaction(&mut c, &[id(2)], |_| Some(Personality::default()), 5, &config, &mut rng)
            .unwrap();
        assert_eq!(result.outcome, InteractionOutcome::Positive);
        assert_eq!(result.compatibility, 1.0);

        let rel = c.relationship(id(2)).unwrap();
        assert_eq!(rel.relation, RelationType::Friend);
        assert_eq!(rel.strength, 23.0);
        assert_eq!(rel.last_interaction, 5);
        assert_eq!(rel.interactions.len(), 1);
    }

    #[test]
    fn test_uniform_target_pick() {
        let mut c = citizen();
        let mut rng = ScriptedRandom::constant(0.7);
        let config = BehaviorConfig::default();
        let result =
            resolve_interaction(&mut c, &[id(2), id(3), id(4)], |_| None, 0, &config, &mut rng)
                .unwrap();
        assert_eq!(result.target, id(4));
    }

    #[test]
    fn test_no_candidates() {
        let mut c = citizen();
        let mut rng = ScriptedRandom::constant(0.0);
        assert!(resolve_interaction(&mut c, &[], |_| None, 0, &BehaviorConfig::default(), &mut rng).is_none());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_negative_interaction_can_prune() {
        let mut c = citizen();
        c.personality = Personality {
            ambition: 0.0,
            sociability: 0.0,
            industriousness: 0.0,
            contentment: 0.0,
            curiosity: 0.0,
        };
        c.relationships.push(Relationship::new(id(2), RelationType::Rival, 11.0, 0));
        let opposite = Personality {
            ambition: 1.0,
            sociability: 1.0,
            industriousness: 1.0,
            contentment: 1.0,
            curiosity: 1.0,
        };
        let mut rng = ScriptedRandom::constant(0.0);
        let result =
            resolve_interaction(&mut c, &[id(2)], |_| Some(opposite.clone()), 3, &BehaviorConfig::default(), &mut rng)
                .unwrap();
        assert_eq!(result.outcome, InteractionOutcome::Negative);
        assert!(result.pruned);
        assert!(c.relationship(id(2)).is_none());
    }

    #[test]
    fn test_decay_after_grace_period() {
        let config = BehaviorConfig::default();
        let mut c = citizen();
        c.relationships.push(Relationship::new(id(2), RelationType::Friend, 12.0, 0));

        // 6 idle cycles: untouched
        assert_eq!(decay_relationships(&mut c, 6, &config), 0);
        assert_eq!(c.relationship(id(2)).unwrap().strength, 12.0);

        assert_eq!(decay_relationships(&mut c, 7, &config), 0);
        assert_eq!(c.relationship(id(2)).unwrap().strength, 11.0);
        assert_eq!(decay_relationships(&mut c, 8, &config), 0);
        assert_eq!(c.relationship(id(2)).unwrap().strength, 10.0);

        // 9.0 < 10 is removed
        assert_eq!(decay_relationships(&mut c, 9, &config), 1);
        assert!(c.relationships.is_empty());
    }

    #[test]
    fn test_recent_contact_prevents_decay() {
        let config = BehaviorConfig::default();
        let mut c = citizen();
        c.relationships.push(Relationship::new(id(2), RelationType::Family, 50.0, 10));
        decay_relationships(&mut c, 12, &config);
        assert_eq!(c.relationship(id(2)).unwrap().strength, 50.0);
    }
}
