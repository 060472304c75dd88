//! Cycle orchestration - runs every tracked citizen through one in-game hour
//!
//! Per citizen, in order:
//! safety from threat -> need decay -> mood -> decision -> history ->
//! movement -> social contact -> relationship decay -> life event -> economy
//!
//! A citizen that stalls and switches to an alternative target keeps that
//! detour on later cycles until it arrives or picks a different pattern.
//!
//! Afterward the community aggregate is computed and history for citizens no
//! longer tracked is dropped.

use std::collections::HashSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::city::view::CityView;
use crate::core::config::BehaviorConfig;
use crate::core::error::{CivicError, Result};
use crate::core::random::RandomSource;
use crate::core::types::{BuildingId, CitizenId, Cycle, Vec2};
use crate::entity::citizen::Citizen;
use crate::entity::life_events::LifeEventRecord;
use crate::entity::mood::MoodContext;
use crate::entity::personality::Personality;
use crate::entity::relationships::InteractionOutcome;
use crate::rules::catalog::PatternCatalog;
use crate::rules::pattern::ActionKind;
use crate::simulation::action_select::select_pattern;
use crate::simulation::community::CommunityMood;
use crate::simulation::goal::{
    emergency_goal, explore_goal, synthesize_goal, AlternativeTarget, GoalPurpose, PathfindingGoal,
};
use crate::simulation::history::{BehaviorHistory, BehaviorHistoryEntry};
use crate::simulation::life_events::roll_life_event;
use crate::simulation::movement::{step_toward, MovementOutcome, MovementTrack};
use crate::simulation::rule_eval::evaluate_patterns;
use crate::simulation::social::{decay_relationships, resolve_interaction};

/// Notable things that happened during a cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CycleEvent {
    /// Citizen reached its goal and finished the activity
    ActivityCompleted {
        citizen: CitizenId,
        action: ActionKind,
    },
    /// Movement stalled and the goal switched to an alternative
    Replanned { citizen: CitizenId },
    Interaction {
        citizen: CitizenId,
        target: CitizenId,
        outcome: InteractionOutcome,
    },
    RelationshipsPruned { citizen: CitizenId, count: usize },
    EconomySettled { citizen: CitizenId, wealth: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAssignment {
    pub citizen: CitizenId,
    pub goal: PathfindingGoal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiredLifeEvent {
    pub citizen: CitizenId,
    pub record: LifeEventRecord,
}

/// Everything a cycle produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle: Cycle,
    pub hour: u32,
    pub threat_level: f32,
    pub goals: Vec<GoalAssignment>,
    pub life_events: Vec<FiredLifeEvent>,
    pub events: Vec<CycleEvent>,
    pub history_appended: usize,
    pub community: CommunityMood,
}

/// Alternative target a citizen switched to after stalling
#[derive(Debug, Clone, PartialEq)]
struct Detour {
    pattern_id: Option<String>,
    purpose: GoalPurpose,
    target: Vec2,
    alternatives: Vec<AlternativeTarget>,
}

impl Detour {
    fn from_goal(goal: &PathfindingGoal) -> Self {
        Self {
            pattern_id: goal.pattern_id.clone(),
            purpose: goal.purpose,
            target: goal.target,
            alternatives: goal.alternatives.clone(),
        }
    }

    /// Redirect a freshly decided goal if it pursues the same thing
    fn apply(self, goal: &mut PathfindingGoal) -> bool {
        if self.pattern_id != goal.pattern_id || self.purpose != goal.purpose {
            return false;
        }
        goal.target = self.target;
        goal.alternatives = self.alternatives;
        true
    }
}

/// Pick a goal for one citizen
///
/// Urgent needs bypass the catalog. Otherwise applicable patterns are
/// weighed and the winner becomes a goal; with nothing applicable the
/// citizen explores.
pub fn decide(
    citizen: &Citizen,
    catalog: &PatternCatalog,
    history: &BehaviorHistory,
    config: &BehaviorConfig,
    view: &CityView,
    claimed: &[Vec2],
    workplace_of: &dyn Fn(CitizenId) -> Option<BuildingId>,
    rng: &mut dyn RandomSource,
) -> PathfindingGoal {
    if let Some(goal) = emergency_goal(citizen, view, config, rng) {
        tracing::trace!(citizen = %citizen.id, label = %goal.label, "Emergency override");
        return goal;
    }

    let candidates = evaluate_patterns(citizen, view.clock.hour(), catalog);
    match select_pattern(citizen.id, &candidates, history, config.repetition_window, rng) {
        Some(pattern) => synthesize_goal(citizen, pattern, view, workplace_of, config, rng),
        None => explore_goal(citizen, view, claimed, config, rng),
    }
}

/// Apply what finishing an activity gives back
///
/// Runs on every cycle the citizen is within the arrival radius, so staying
/// at a market keeps topping up food each hour.
pub fn complete_activity(citizen: &mut Citizen, action: ActionKind) {
    if let Some((need, amount)) = action.need_restoration() {
        citizen.needs.adjust(need, amount);
    }
    let energy = action.energy_restoration();
    if energy > 0.0 {
        citizen.mood.energy = (citizen.mood.energy + energy).min(100.0);
    }
}

fn activity_label(citizen: &Citizen, goal: &PathfindingGoal, hour: u32) -> String {
    match (&goal.pattern_id, goal.action) {
        (Some(_), action) => action.label().to_string(),
        (None, ActionKind::Explore) => citizen
            .schedule
            .activity_at(hour)
            .unwrap_or("exploring")
            .to_string(),
        (None, _) => goal.label.clone(),
    }
}

/// Owns the tracked citizens and all per-citizen state between cycles
pub struct SimulationContext {
    citizens: Vec<Citizen>,
    history: BehaviorHistory,
    catalog: PatternCatalog,
    config: BehaviorConfig,
    tracks: AHashMap<CitizenId, MovementTrack>,
    detours: AHashMap<CitizenId, Detour>,
}

impl SimulationContext {
    pub fn new(catalog: PatternCatalog, config: BehaviorConfig) -> Self {
        Self {
            citizens: Vec::new(),
            history: BehaviorHistory::new(config.history_capacity),
            catalog,
            config,
            tracks: AHashMap::new(),
            detours: AHashMap::new(),
        }
    }

    /// Track a citizen; returns false if the id is already tracked
    pub fn add_citizen(&mut self, citizen: Citizen) -> bool {
        if self.citizen(citizen.id).is_some() {
            return false;
        }
        self.citizens.push(citizen);
        true
    }

    /// Stop tracking a citizen and forget its history
    pub fn remove_citizen(&mut self, id: CitizenId) -> Option<Citizen> {
        let index = self.citizens.iter().position(|c| c.id == id)?;
        self.history.reset(id);
        self.tracks.remove(&id);
        self.detours.remove(&id);
        Some(self.citizens.remove(index))
    }

    pub fn citizen(&self, id: CitizenId) -> Option<&Citizen> {
        self.citizens.iter().find(|c| c.id == id)
    }

    pub fn citizen_mut(&mut self, id: CitizenId) -> Option<&mut Citizen> {
        self.citizens.iter_mut().find(|c| c.id == id)
    }

    /// Like `citizen`, for callers that treat a missing id as an error
    pub fn require_citizen(&self, id: CitizenId) -> Result<&Citizen> {
        self.citizen(id).ok_or(CivicError::CitizenNotFound(id))
    }

    pub fn citizens(&self) -> &[Citizen] {
        &self.citizens
    }

    pub fn history(&self) -> &BehaviorHistory {
        &self.history
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn community_mood(&self) -> CommunityMood {
        CommunityMood::from_citizens(&self.citizens)
    }

    /// Run one cycle for every tracked citizen
    pub fn run_cycle(&mut self, view: &CityView, rng: &mut dyn RandomSource) -> CycleReport {
        let Self {
            citizens,
            history,
            catalog,
            config,
            tracks,
            detours,
        } = self;

        let clock = view.clock;
        let cycle = clock.cycle();
        let hour = clock.hour();
        let threat = view.effective_threat(citizens.len());

        let personalities: AHashMap<CitizenId, Personality> = citizens
            .iter()
            .map(|c| (c.id, c.personality.clone()))
            .collect();
        let workplaces: AHashMap<CitizenId, BuildingId> = citizens
            .iter()
            .filter_map(|c| c.workplace.map(|w| (c.id, w)))
            .collect();
        let workplace_of = |id: CitizenId| workplaces.get(&id).copied();

        let mut report = CycleReport {
            cycle,
            hour,
            threat_level: threat,
            goals: Vec::with_capacity(citizens.len()),
            life_events: Vec::new(),
            events: Vec::new(),
            history_appended: 0,
            community: CommunityMood::default(),
        };
        let mut claimed: Vec<Vec2> = Vec::with_capacity(citizens.len());

        for i in 0..citizens.len() {
            let id = citizens[i].id;

            // Needs and mood
            {
                let citizen = &mut citizens[i];
                citizen.needs.set_safety(100.0 - threat);
                let contentment = citizen.personality.contentment;
                citizen.needs.decay(contentment);
                let ctx = MoodContext {
                    threat_level: threat,
                    employed: citizen.is_employed(),
                };
                citizen.mood.update(&citizen.needs, &citizen.personality, &ctx);
            }

            // Decision
            let mut goal = decide(
                &citizens[i],
                catalog,
                history,
                config,
                view,
                &claimed,
                &workplace_of,
                rng,
            );
            let detoured = detours
                .remove(&id)
                .map_or(false, |detour| detour.apply(&mut goal));
            let activity = activity_label(&citizens[i], &goal, hour);
            citizens[i].activity = activity;
            if let Some(pattern_id) = &goal.pattern_id {
                history.record(id, BehaviorHistoryEntry::new(pattern_id.clone(), cycle));
                report.history_appended += 1;
            }
            tracing::trace!(
                citizen = %id,
                purpose = ?goal.purpose,
                urgency = goal.urgency,
                "Goal chosen"
            );

            // Movement
            {
                let citizen = &mut citizens[i];
                let mut track = tracks.remove(&id);
                match step_toward(citizen, &mut goal, &mut track, config, rng) {
                    MovementOutcome::Arrived => {
                        complete_activity(citizen, goal.action);
                        if goal.pattern_id.is_some() {
                            history.update_latest(id, true, citizen.needs.satisfaction());
                        }
                        report.events.push(CycleEvent::ActivityCompleted {
                            citizen: id,
                            action: goal.action,
                        });
                    }
                    MovementOutcome::Replanned => {
                        detours.insert(id, Detour::from_goal(&goal));
                        report.events.push(CycleEvent::Replanned { citizen: id });
                    }
                    MovementOutcome::Moved { .. } => {
                        if detoured {
                            detours.insert(id, Detour::from_goal(&goal));
                        }
                    }
                }
                if let Some(track) = track {
                    tracks.insert(id, track);
                }
            }
            claimed.push(goal.target);

            // Social contact with whoever is close by
            let location = citizens[i].location;
            let neighbours: Vec<CitizenId> = citizens
                .iter()
                .filter(|other| {
                    other.id != id && other.location.distance(&location) <= config.interaction_radius
                })
                .map(|other| other.id)
                .collect();

            let citizen = &mut citizens[i];
            if !neighbours.is_empty()
                && rng.chance(citizen.personality.sociability * config.interaction_chance)
            {
                let lookup = |target: CitizenId| personalities.get(&target).cloned();
                if let Some(result) =
                    resolve_interaction(citizen, &neighbours, lookup, cycle, config, rng)
                {
                    report.events.push(CycleEvent::Interaction {
                        citizen: id,
                        target: result.target,
                        outcome: result.outcome,
                    });
                }
            }

            let pruned = decay_relationships(citizen, cycle, config);
            if pruned > 0 {
                report.events.push(CycleEvent::RelationshipsPruned {
                    citizen: id,
                    count: pruned,
                });
            }

            if let Some(record) =
                roll_life_event(citizen, threat, &clock, config.life_event_chance, rng)
            {
                report.life_events.push(FiredLifeEvent { citizen: id, record });
            }

            if hour == 0 {
                citizen.wealth += citizen.income - citizen.expenses;
                report.events.push(CycleEvent::EconomySettled {
                    citizen: id,
                    wealth: citizen.wealth,
                });
            }

            report.goals.push(GoalAssignment { citizen: id, goal });
        }

        report.community = CommunityMood::from_citizens(citizens);

        let active: HashSet<CitizenId> = citizens.iter().map(|c| c.id).collect();
        let dropped = history.prune(&active);
        tracks.retain(|id, _| active.contains(id));
        detours.retain(|id, _| active.contains(id));

        tracing::debug!(
            cycle,
            hour,
            citizens = citizens.len(),
            threat,
            life_events = report.life_events.len(),
            happiness = report.community.happiness,
            stress = report.community.stress,
            dropped_histories = dropped,
            "Cycle complete"
        );

        report
    }
}
