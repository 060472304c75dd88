//! Goal synthesis - turn a chosen pattern into a spatial target
//!
//! Goals are regenerated on every decision. Each carries a short ranked list
//! of fallback positions near the target that movement can switch to when
//! progress stalls.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::city::snapshot::BuildingSnapshot;
use crate::city::view::CityView;
use crate::core::config::BehaviorConfig;
use crate::core::random::RandomSource;
use crate::core::types::{clamp_percent, BuildingId, CitizenId, Vec2};
use crate::entity::citizen::{Citizen, WorkStyle};
use crate::rules::pattern::{ActionKind, BehaviorPattern, TargetKind};

/// Offset used when no unclaimed exploration point is found
const EXPLORE_FALLBACK_OFFSET: f32 = 2.0;

/// Bonus per colleague working at a building, for citizens who like company
const COLLEAGUE_BONUS: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalPurpose {
    Work,
    Home,
    Social,
    Resource,
    Explore,
    Emergency,
}

impl GoalPurpose {
    /// Infer purpose from a target label, first match wins
    pub fn infer(label: &str) -> Self {
        if label.contains("work") {
            GoalPurpose::Work
        } else if label.contains("social") {
            GoalPurpose::Social
        } else if label.contains("food") || label.contains("resource") {
            GoalPurpose::Resource
        } else if label.contains("home") {
            GoalPurpose::Home
        } else {
            GoalPurpose::Explore
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlternativeTarget {
    pub position: Vec2,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathfindingGoal {
    pub target: Vec2,
    pub label: String,
    pub purpose: GoalPurpose,
    pub priority: i32,
    /// 0..=100
    pub urgency: f32,
    /// Ranked best first
    pub alternatives: Vec<AlternativeTarget>,
    /// Informational; nothing here enforces it
    pub time_limit: Option<u32>,
    /// Pattern the goal came from, `None` for fallbacks
    pub pattern_id: Option<String>,
    pub action: ActionKind,
}

impl PathfindingGoal {
    /// Replace the primary target with the best alternative, if any
    pub fn promote_alternative(&mut self) -> bool {
        if self.alternatives.is_empty() {
            return false;
        }
        let next = self.alternatives.remove(0);
        self.target = next.position;
        true
    }
}

/// Urgency from priority plus need and stress bonuses
pub fn compute_urgency(priority: i32, citizen: &Citizen) -> f32 {
    let mut urgency = priority as f32;
    if citizen.needs.food < 30.0 {
        urgency += 30.0;
    }
    if citizen.needs.shelter < 30.0 {
        urgency += 20.0;
    }
    if citizen.mood.stress > 70.0 {
        urgency += 15.0;
    }
    clamp_percent(urgency)
}

/// Closest farm or market
pub fn nearest_food_source<'a>(
    location: Vec2,
    buildings: &'a [BuildingSnapshot],
) -> Option<&'a BuildingSnapshot> {
    buildings
        .iter()
        .filter(|b| b.kind.is_food_source())
        .min_by_key(|b| OrderedFloat(location.distance(&b.position)))
}

/// Score a workplace for a citizen
///
/// `workplace_of` maps a colleague to the building they work at; social
/// workers gain a bonus for each colleague employed at `building`.
pub fn workplace_score(
    citizen: &Citizen,
    building: &BuildingSnapshot,
    workplace_of: &dyn Fn(CitizenId) -> Option<BuildingId>,
) -> f32 {
    let mut score = building.utility_efficiency - 2.0 * citizen.location.distance(&building.position);
    if citizen.preferences.work_style == WorkStyle::Social {
        let present = citizen
            .colleagues()
            .filter(|id| workplace_of(*id) == Some(building.id))
            .count();
        score += COLLEAGUE_BONUS * present as f32;
    }
    score
}

/// Highest scoring workplace; the first one wins on ties
pub fn optimal_workplace<'a>(
    citizen: &Citizen,
    buildings: &'a [BuildingSnapshot],
    workplace_of: &dyn Fn(CitizenId) -> Option<BuildingId>,
) -> Option<&'a BuildingSnapshot> {
    let mut best: Option<(&BuildingSnapshot, f32)> = None;
    for building in buildings.iter().filter(|b| b.kind.is_workplace()) {
        let score = workplace_score(citizen, building, workplace_of);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((building, score)),
        }
    }
    best.map(|(b, _)| b)
}

fn random_pick<'a>(
    buildings: Vec<&'a BuildingSnapshot>,
    rng: &mut dyn RandomSource,
) -> Option<&'a BuildingSnapshot> {
    if buildings.is_empty() {
        None
    } else {
        Some(buildings[rng.pick_index(buildings.len())])
    }
}

/// The citizen's own home if the city still has it, else any residence
pub fn home_position(citizen: &Citizen, view: &CityView, rng: &mut dyn RandomSource) -> Option<Vec2> {
    if let Some(home) = citizen.home.and_then(|id| view.building(id)) {
        return Some(home.position);
    }
    let residences: Vec<_> = view.buildings.iter().filter(|b| b.kind.is_residence()).collect();
    random_pick(residences, rng).map(|b| b.position)
}

/// Resolve a target kind to a position, falling back to the current location
pub fn resolve_target(
    citizen: &Citizen,
    target: &TargetKind,
    view: &CityView,
    workplace_of: &dyn Fn(CitizenId) -> Option<BuildingId>,
    rng: &mut dyn RandomSource,
) -> Vec2 {
    let buildings = view.buildings;
    let resolved = match target {
        TargetKind::NearestFoodSource => {
            nearest_food_source(citizen.location, buildings).map(|b| b.position)
        }
        TargetKind::OptimalWorkplace => {
            optimal_workplace(citizen, buildings, workplace_of).map(|b| b.position)
        }
        TargetKind::SocialHub => {
            let hubs: Vec<_> = buildings.iter().filter(|b| b.kind.is_social_hub()).collect();
            random_pick(hubs, rng).map(|b| b.position)
        }
        TargetKind::WorkplaceWithColleagues => {
            let staffed: Vec<_> = buildings
                .iter()
                .filter(|b| b.kind.is_workplace() && b.workers > 0)
                .collect();
            let pool = if staffed.is_empty() {
                buildings.iter().filter(|b| b.kind.is_workplace()).collect()
            } else {
                staffed
            };
            random_pick(pool, rng).map(|b| b.position)
        }
        TargetKind::RestLocation => home_position(citizen, view, rng),
        TargetKind::Other(_) => None,
    };
    resolved.unwrap_or(citizen.location)
}

/// Fallback positions around a target, best score first
pub fn generate_alternatives(
    target: Vec2,
    config: &BehaviorConfig,
    rng: &mut dyn RandomSource,
) -> Vec<AlternativeTarget> {
    let spread = config.alternative_spread;
    let mut alternatives: Vec<AlternativeTarget> = (0..config.alternative_count)
        .map(|_| {
            let offset = Vec2::new(rng.range(-spread, spread), rng.range(-spread, spread));
            AlternativeTarget {
                position: target + offset,
                score: rng.random(),
            }
        })
        .collect();
    alternatives.sort_by_key(|a| std::cmp::Reverse(OrderedFloat(a.score)));
    alternatives
}

/// Goal for a selected pattern, driven by its first action
pub fn synthesize_goal(
    citizen: &Citizen,
    pattern: &BehaviorPattern,
    view: &CityView,
    workplace_of: &dyn Fn(CitizenId) -> Option<BuildingId>,
    config: &BehaviorConfig,
    rng: &mut dyn RandomSource,
) -> PathfindingGoal {
    let Some(action) = pattern.primary_action() else {
        return explore_goal(citizen, view, &[], config, rng);
    };

    let (target, label) = match &action.target {
        Some(kind) => (
            resolve_target(citizen, kind, view, workplace_of, rng),
            kind.label().to_string(),
        ),
        None => (citizen.location, action.kind.label().to_string()),
    };

    PathfindingGoal {
        target,
        purpose: GoalPurpose::infer(&label),
        label,
        priority: pattern.priority,
        urgency: compute_urgency(pattern.priority, citizen),
        alternatives: generate_alternatives(target, config, rng),
        time_limit: action.duration,
        pattern_id: Some(pattern.id.clone()),
        action: action.kind,
    }
}

/// Goal used when no pattern applies
///
/// Looks for a point within the explore radius that is clear of buildings and
/// of other citizens' targets; if none is found after a few attempts, the
/// citizen wanders a small step from where it stands.
pub fn explore_goal(
    citizen: &Citizen,
    view: &CityView,
    claimed: &[Vec2],
    config: &BehaviorConfig,
    rng: &mut dyn RandomSource,
) -> PathfindingGoal {
    let radius = config.explore_radius;
    let clearance = config.explore_clearance;

    let is_free = |point: &Vec2| {
        view.buildings
            .iter()
            .all(|b| b.position.distance(point) >= clearance)
            && claimed.iter().all(|c| c.distance(point) >= clearance)
    };

    let mut target = None;
    for _ in 0..config.explore_attempts {
        let candidate =
            citizen.location + Vec2::new(rng.range(-radius, radius), rng.range(-radius, radius));
        if is_free(&candidate) {
            target = Some(candidate);
            break;
        }
    }

    let target = match target {
        Some(point) => point,
        None => {
            citizen.location
                + Vec2::new(
                    rng.range(-EXPLORE_FALLBACK_OFFSET, EXPLORE_FALLBACK_OFFSET),
                    rng.range(-EXPLORE_FALLBACK_OFFSET, EXPLORE_FALLBACK_OFFSET),
                )
        }
    };

    PathfindingGoal {
        target,
        label: "explore".to_string(),
        purpose: GoalPurpose::Explore,
        priority: 0,
        urgency: clamp_percent(citizen.preferences.exploration_drive),
        alternatives: generate_alternatives(target, config, rng),
        time_limit: None,
        pattern_id: None,
        action: ActionKind::Explore,
    }
}

/// Direct response to starvation or danger that bypasses the catalog
pub fn emergency_goal(
    citizen: &Citizen,
    view: &CityView,
    config: &BehaviorConfig,
    rng: &mut dyn RandomSource,
) -> Option<PathfindingGoal> {
    let (target, label, action) = if citizen.needs.food < config.emergency_food_threshold {
        let target = nearest_food_source(citizen.location, view.buildings)
            .map(|b| b.position)
            .unwrap_or(citizen.location);
        (target, "emergency_food", ActionKind::SeekFood)
    } else if citizen.needs.safety < config.emergency_safety_threshold {
        let target = home_position(citizen, view, rng).unwrap_or(citizen.location);
        (target, "emergency_home", ActionKind::SeekShelter)
    } else {
        return None;
    };

    Some(PathfindingGoal {
        target,
        label: label.to_string(),
        purpose: GoalPurpose::Emergency,
        priority: 100,
        urgency: 100.0,
        alternatives: generate_alternatives(target, config, rng),
        time_limit: None,
        pattern_id: None,
        action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::ledger::ResourceLedger;
    use crate::city::snapshot::BuildingKind;
    use crate::core::calendar::WorldClock;
    use crate::core::random::ScriptedRandom;
    use crate::core::types::Cycle;
    use crate::entity::relationships::{RelationType, Relationship};
    use crate::rules::pattern::PatternAction;

    fn citizen_at(x: f32, y: f32) -> Citizen {
        Citizen::new(CitizenId::from_random_bytes([5; 16]), "Goal", Vec2::new(x, y))
    }

    fn building(id: u32, kind: BuildingKind, x: f32, y: f32) -> BuildingSnapshot {
        BuildingSnapshot::new(BuildingId(id), kind, Vec2::new(x, y))
    }

    fn nowhere(_: CitizenId) -> Option<BuildingId> {
        None
    }

    fn colleague(n: u8, cycle: Cycle) -> Relationship {
        Relationship::new(CitizenId::from_random_bytes([n; 16]), RelationType::Colleague, 50.0, cycle)
    }

    #[test]
    fn test_purpose_inference() {
        assert_eq!(GoalPurpose::infer("optimal_workplace"), GoalPurpose::Work);
        assert_eq!(GoalPurpose::infer("workplace_with_colleagues"), GoalPurpose::Work);
        assert_eq!(GoalPurpose::infer("social_hub"), GoalPurpose::Social);
        assert_eq!(GoalPurpose::infer("nearest_food_source"), GoalPurpose::Resource);
        assert_eq!(GoalPurpose::infer("home"), GoalPurpose::Home);
        assert_eq!(GoalPurpose::infer("library"), GoalPurpose::Explore);
    }

    #[test]
    fn test_urgency_bonuses_and_clamp() {
        let mut c = citizen_at(0.0, 0.0);
        assert_eq!(compute_urgency(40, &c), 40.0);
        c.needs.food = 10.0;
        c.needs.shelter = 10.0;
        assert_eq!(compute_urgency(40, &c), 90.0);
        c.mood.stress = 80.0;
        assert_eq!(compute_urgency(40, &c), 100.0);
    }

    #[test]
    fn test_nearest_food_source() {
        let buildings = vec![
            building(1, BuildingKind::Market, 10.0, 0.0),
            building(2, BuildingKind::Office, 1.0, 0.0),
            building(3, BuildingKind::Farm, 4.0, 0.0),
        ];
        let nearest = nearest_food_source(Vec2::default(), &buildings).unwrap();
        assert_eq!(nearest.id, BuildingId(3));
        assert!(nearest_food_source(Vec2::default(), &buildings[1..2]).is_none());
    }

    #[test]
    fn test_optimal_workplace_prefers_close_and_efficient() {
        let buildings = vec![
            building(1, BuildingKind::Office, 5.0, 0.0).with_utility_efficiency(1.0),
            building(2, BuildingKind::Industrial, 4.0, 0.0).with_utility_efficiency(0.2),
            building(3, BuildingKind::Residential, 0.0, 0.0),
        ];
        let c = citizen_at(0.0, 0.0);
        // office: 1 - 10 = -9, industrial: 0.2 - 8 = -7.8
        assert_eq!(optimal_workplace(&c, &buildings, &nowhere).unwrap().id, BuildingId(2));
    }

    #[test]
    fn test_colleague_bonus_only_for_social_style() {
        let b = building(1, BuildingKind::Office, 1.0, 0.0);
        let mut c = citizen_at(0.0, 0.0);
        c.relationships.push(colleague(1, 0));
        c.relationships.push(colleague(2, 0));
        let at_office = |_: CitizenId| Some(BuildingId(1));
        assert!((workplace_score(&c, &b, &at_office) - (-1.0)).abs() < 1e-6);

        c.preferences.work_style = WorkStyle::Social;
        assert!((workplace_score(&c, &b, &at_office) - 19.0).abs() < 1e-6);
        // Colleagues employed elsewhere add nothing here
        assert!((workplace_score(&c, &b, &nowhere) - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_colleagues_pull_social_worker_to_farther_office() {
        let buildings = vec![
            building(1, BuildingKind::Office, 2.0, 0.0),
            building(2, BuildingKind::Office, 4.0, 0.0),
        ];
        let mut c = citizen_at(0.0, 0.0);
        c.preferences.work_style = WorkStyle::Social;
        for n in 1..=8 {
            c.relationships.push(colleague(n, 0));
        }
        assert_eq!(optimal_workplace(&c, &buildings, &nowhere).unwrap().id, BuildingId(1));

        // 1 - 8 + 80 beats 1 - 4 at the nearer office
        let at_far_office = |_: CitizenId| Some(BuildingId(2));
        assert_eq!(
            optimal_workplace(&c, &buildings, &at_far_office).unwrap().id,
            BuildingId(2)
        );

        // Solo workers ignore where colleagues are
        c.preferences.work_style = WorkStyle::Solo;
        assert_eq!(
            optimal_workplace(&c, &buildings, &at_far_office).unwrap().id,
            BuildingId(1)
        );
    }

    #[test]
    fn test_synthesize_goal_for_seek_food() {
        let buildings = vec![building(1, BuildingKind::Farm, 6.0, 8.0)];
        let ledger = ResourceLedger::new();
        let view = CityView::new(WorldClock::default(), &buildings, &ledger, &[]);
        let mut c = citizen_at(0.0, 0.0);
        c.needs.food = 20.0;

        let pattern = BehaviorPattern::new("seek_food", "Find Food", 80).then(
            PatternAction::new(ActionKind::SeekFood)
                .toward(TargetKind::NearestFoodSource)
                .lasting(1),
        );
        let mut rng = ScriptedRandom::new(vec![0.5, 0.5, 0.1, 0.5, 0.5, 0.9, 0.5, 0.5, 0.4]);
        let goal = synthesize_goal(&c, &pattern, &view, &nowhere, &BehaviorConfig::default(), &mut rng);

        assert_eq!(goal.target, Vec2::new(6.0, 8.0));
        assert_eq!(goal.purpose, GoalPurpose::Resource);
        assert_eq!(goal.urgency, 100.0);
        assert_eq!(goal.time_limit, Some(1));
        assert_eq!(goal.pattern_id.as_deref(), Some("seek_food"));

        let scores: Vec<f32> = goal.alternatives.iter().map(|a| a.score).collect();
        assert_eq!(scores, vec![0.9, 0.4, 0.1]);
        for alt in &goal.alternatives {
            assert_eq!(alt.position, Vec2::new(6.0, 8.0));
        }
    }

    #[test]
    fn test_unknown_target_stays_put() {
        let ledger = ResourceLedger::new();
        let view = CityView::new(WorldClock::default(), &[], &ledger, &[]);
        let c = citizen_at(3.0, 4.0);
        let pattern = BehaviorPattern::new("read", "Read", 10)
            .then(PatternAction::new(ActionKind::Explore).toward(TargetKind::Other("library".into())));
        let mut rng = ScriptedRandom::constant(0.5);
        let goal = synthesize_goal(&c, &pattern, &view, &nowhere, &BehaviorConfig::default(), &mut rng);
        assert_eq!(goal.target, Vec2::new(3.0, 4.0));
        assert_eq!(goal.purpose, GoalPurpose::Explore);
    }

    #[test]
    fn test_rest_location_prefers_own_home() {
        let buildings = vec![
            building(1, BuildingKind::Residential, 1.0, 1.0),
            building(2, BuildingKind::Residential, 9.0, 9.0),
        ];
        let ledger = ResourceLedger::new();
        let view = CityView::new(WorldClock::default(), &buildings, &ledger, &[]);
        let mut c = citizen_at(0.0, 0.0);
        c.home = Some(BuildingId(2));
        let mut rng = ScriptedRandom::constant(0.0);
        assert_eq!(
            resolve_target(&c, &TargetKind::RestLocation, &view, &nowhere, &mut rng),
            Vec2::new(9.0, 9.0)
        );
    }

    #[test]
    fn test_explore_goal_uses_drive_as_urgency() {
        let ledger = ResourceLedger::new();
        let view = CityView::new(WorldClock::default(), &[], &ledger, &[]);
        let mut c = citizen_at(0.0, 0.0);
        c.preferences.exploration_drive = 42.0;
        let mut rng = ScriptedRandom::constant(1.0);
        let goal = explore_goal(&c, &view, &[], &BehaviorConfig::default(), &mut rng);
        assert_eq!(goal.purpose, GoalPurpose::Explore);
        assert_eq!(goal.urgency, 42.0);
        assert_eq!(goal.target, Vec2::new(10.0, 10.0));
        assert!(goal.pattern_id.is_none());
    }

    #[test]
    fn test_explore_falls_back_to_small_offset() {
        // Every candidate lands on the same claimed point
        let ledger = ResourceLedger::new();
        let view = CityView::new(WorldClock::default(), &[], &ledger, &[]);
        let c = citizen_at(0.0, 0.0);
        let mut rng = ScriptedRandom::constant(1.0);
        let claimed = [Vec2::new(10.0, 10.0)];
        let goal = explore_goal(&c, &view, &claimed, &BehaviorConfig::default(), &mut rng);
        assert_eq!(goal.target, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_emergency_goal_thresholds() {
        let buildings = vec![building(1, BuildingKind::Market, 2.0, 0.0)];
        let ledger = ResourceLedger::new();
        let view = CityView::new(WorldClock::default(), &buildings, &ledger, &[]);
        let config = BehaviorConfig::default();
        let mut rng = ScriptedRandom::constant(0.5);

        let mut c = citizen_at(0.0, 0.0);
        assert!(emergency_goal(&c, &view, &config, &mut rng).is_none());

        c.needs.food = 5.0;
        let goal = emergency_goal(&c, &view, &config, &mut rng).unwrap();
        assert_eq!(goal.purpose, GoalPurpose::Emergency);
        assert_eq!(goal.urgency, 100.0);
        assert_eq!(goal.target, Vec2::new(2.0, 0.0));
        assert_eq!(goal.action, ActionKind::SeekFood);

        c.needs.food = 50.0;
        c.needs.safety = 5.0;
        let goal = emergency_goal(&c, &view, &config, &mut rng).unwrap();
        assert_eq!(goal.action, ActionKind::SeekShelter);
        assert_eq!(goal.target, c.location);
    }

    #[test]
    fn test_promote_alternative() {
        let mut goal = PathfindingGoal {
            target: Vec2::default(),
            label: "x".into(),
            purpose: GoalPurpose::Explore,
            priority: 0,
            urgency: 0.0,
            alternatives: vec![AlternativeTarget {
                position: Vec2::new(1.0, 1.0),
                score: 0.5,
            }],
            time_limit: None,
            pattern_id: None,
            action: ActionKind::Explore,
        };
        assert!(goal.promote_alternative());
        assert_eq!(goal.target, Vec2::new(1.0, 1.0));
        assert!(!goal.promote_alternative());
    }
}
