//! Citizens and the seeded factory that creates them

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::city::snapshot::BuildingSnapshot;
use crate::core::random::{RandomSource, SeededRandom};
use crate::core::types::{BuildingId, CitizenId, Vec2};
use crate::entity::life_events::LifeEventRecord;
use crate::entity::mood::Mood;
use crate::entity::needs::Needs;
use crate::entity::personality::Personality;
use crate::entity::relationships::{RelationType, Relationship};
use crate::entity::schedule::Schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    NonBinary,
}

/// How a citizen prefers to work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkStyle {
    Solo,
    Social,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub work_style: WorkStyle,
    /// 0..=100; urgency of the exploration fallback
    pub exploration_drive: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            work_style: WorkStyle::Solo,
            exploration_drive: 30.0,
        }
    }
}

/// A simulated inhabitant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citizen {
    pub id: CitizenId,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub personality: Personality,
    pub needs: Needs,
    pub mood: Mood,
    pub activity: String,
    pub location: Vec2,
    pub schedule: Schedule,
    pub preferences: Preferences,
    pub home: Option<BuildingId>,
    pub workplace: Option<BuildingId>,
    pub relationships: Vec<Relationship>,
    pub life_events: Vec<LifeEventRecord>,
    pub wealth: f32,
    pub income: f32,
    pub expenses: f32,
    pub skills: BTreeMap<String, f32>,
}

impl Citizen {
    /// A citizen with neutral defaults; mostly useful for tests and tooling
    pub fn new(id: CitizenId, name: impl Into<String>, location: Vec2) -> Self {
        Self {
            id,
            name: name.into(),
            age: 30,
            gender: Gender::NonBinary,
            personality: Personality::default(),
            needs: Needs::default(),
            mood: Mood::default(),
            activity: "idle".to_string(),
            location,
            schedule: Schedule::default(),
            preferences: Preferences::default(),
            home: None,
            workplace: None,
            relationships: Vec::new(),
            life_events: Vec::new(),
            wealth: 100.0,
            income: 0.0,
            expenses: 0.0,
            skills: BTreeMap::new(),
        }
    }

    pub fn is_employed(&self) -> bool {
        self.workplace.is_some()
    }

    pub fn relationship(&self, target: CitizenId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.target == target)
    }

    pub fn relationship_mut(&mut self, target: CitizenId) -> Option<&mut Relationship> {
        self.relationships.iter_mut().find(|r| r.target == target)
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Ids of everyone this citizen knows as a colleague
    pub fn colleagues(&self) -> impl Iterator<Item = CitizenId> + '_ {
        self.relationships
            .iter()
            .filter(|r| r.relation == RelationType::Colleague)
            .map(|r| r.target)
    }
}

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bram", "Cleo", "Dario", "Edda", "Felix", "Greta", "Hugo", "Iris", "Jonas",
    "Kaia", "Luca", "Mira", "Nico", "Oona", "Pavel", "Quinn", "Rosa", "Silas", "Tove",
];

const LAST_NAMES: &[&str] = &[
    "Archer", "Baker", "Carter", "Dyer", "Fisher", "Fletcher", "Mason", "Miller",
    "Porter", "Sawyer", "Thatcher", "Weaver",
];

const SKILLS: &[&str] = &["labor", "trade", "craft", "social"];

/// Deterministic citizen generator
///
/// The same seed and the same building list always produce the same
/// population, ids included.
pub struct CitizenFactory {
    rng: SeededRandom,
    bounds_min: Vec2,
    bounds_max: Vec2,
    homes: Vec<BuildingId>,
    workplaces: Vec<BuildingId>,
    employment_rate: f32,
}

impl CitizenFactory {
    pub fn new(seed: u64, bounds_min: Vec2, bounds_max: Vec2) -> Self {
        Self {
            rng: SeededRandom::new(seed),
            bounds_min,
            bounds_max,
            homes: Vec::new(),
            workplaces: Vec::new(),
            employment_rate: 0.8,
        }
    }

    /// Let spawned citizens take homes and jobs from the given buildings
    pub fn with_buildings(mut self, buildings: &[BuildingSnapshot]) -> Self {
        self.homes = buildings
            .iter()
            .filter(|b| b.kind.is_residence())
            .map(|b| b.id)
            .collect();
        self.workplaces = buildings
            .iter()
            .filter(|b| b.kind.is_workplace())
            .map(|b| b.id)
            .collect();
        self
    }

    pub fn with_employment_rate(mut self, rate: f32) -> Self {
        self.employment_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Generate a name from the built-in lists
    pub fn random_name(&mut self) -> String {
        let first = FIRST_NAMES[self.rng.pick_index(FIRST_NAMES.len())];
        let last = LAST_NAMES[self.rng.pick_index(LAST_NAMES.len())];
        format!("{} {}", first, last)
    }

    pub fn spawn(&mut self, name: impl Into<String>) -> Citizen {
        let id = CitizenId::from_random_bytes(self.rng.bytes());
        let location = Vec2::new(
            self.rng.range(self.bounds_min.x, self.bounds_max.x),
            self.rng.range(self.bounds_min.y, self.bounds_max.y),
        );

        let mut citizen = Citizen::new(id, name, location);
        citizen.age = 18 + self.rng.pick_index(62) as u32;
        citizen.gender = match self.rng.pick_index(3) {
            0 => Gender::Female,
            1 => Gender::Male,
            _ => Gender::NonBinary,
        };
        citizen.personality = Personality::random(&mut self.rng);
        citizen.needs = Needs {
            food: self.rng.range(60.0, 90.0),
            shelter: self.rng.range(60.0, 90.0),
            social: self.rng.range(50.0, 90.0),
            purpose: self.rng.range(50.0, 90.0),
            safety: self.rng.range(70.0, 100.0),
        };
        citizen.preferences = Preferences {
            work_style: if citizen.personality.sociability > 0.5 {
                WorkStyle::Social
            } else {
                WorkStyle::Solo
            },
            exploration_drive: citizen.personality.curiosity * 100.0,
        };

        if !self.homes.is_empty() {
            citizen.home = Some(self.homes[self.rng.pick_index(self.homes.len())]);
        }
        if !self.workplaces.is_empty() && self.rng.chance(self.employment_rate) {
            citizen.workplace = Some(self.workplaces[self.rng.pick_index(self.workplaces.len())]);
        }

        let wake_hour = 5 + self.rng.pick_index(3) as u32;
        citizen.schedule = Schedule::standard(citizen.is_employed(), wake_hour);

        citizen.wealth = self.rng.range(50.0, 500.0);
        citizen.income = if citizen.is_employed() {
            self.rng.range(20.0, 60.0)
        } else {
            5.0
        };
        citizen.expenses = self.rng.range(10.0, 30.0);

        for skill in SKILLS {
            citizen.skills.insert(skill.to_string(), self.rng.random());
        }

        citizen
    }

    /// Spawn `count` citizens with generated names
    pub fn spawn_population(&mut self, count: usize) -> Vec<Citizen> {
        (0..count)
            .map(|_| {
                let name = self.random_name();
                self.spawn(name)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::snapshot::{BuildingCondition, BuildingKind};

    fn bounds() -> (Vec2, Vec2) {
        (Vec2::new(0.0, 0.0), Vec2::new(50.0, 50.0))
    }

    #[test]
    fn test_factory_is_deterministic() {
        let (min, max) = bounds();
        let a = CitizenFactory::new(9, min, max).spawn_population(5);
        let b = CitizenFactory::new(9, min, max).spawn_population(5);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.name, y.name);
            assert_eq!(x.personality, y.personality);
            assert_eq!(x.location, y.location);
        }
    }

    #[test]
    fn test_spawned_values_in_range() {
        let (min, max) = bounds();
        let mut factory = CitizenFactory::new(3, min, max);
        for citizen in factory.spawn_population(50) {
            assert!((18..80).contains(&citizen.age));
            assert!(citizen.location.x >= 0.0 && citizen.location.x < 50.0);
            for v in [
                citizen.personality.ambition,
                citizen.personality.sociability,
                citizen.personality.industriousness,
                citizen.personality.contentment,
                citizen.personality.curiosity,
            ] {
                assert!((0.0..=1.0).contains(&v));
            }
            assert!((0.0..=100.0).contains(&citizen.needs.food));
            assert_eq!(citizen.skills.len(), SKILLS.len());
        }
    }

    #[test]
    fn test_no_workplaces_means_unemployed() {
        let (min, max) = bounds();
        let mut factory = CitizenFactory::new(1, min, max);
        let citizen = factory.spawn("Solo");
        assert!(!citizen.is_employed());
        assert_eq!(citizen.income, 5.0);
    }

    #[test]
    fn test_full_employment_with_workplaces() {
        let (min, max) = bounds();
        let buildings = vec![
            BuildingSnapshot::new(BuildingId(1), BuildingKind::Office, Vec2::new(5.0, 5.0)),
            BuildingSnapshot::new(BuildingId(2), BuildingKind::Residential, Vec2::new(9.0, 9.0))
                .with_condition(BuildingCondition::Good),
        ];
        let mut factory = CitizenFactory::new(1, min, max)
            .with_buildings(&buildings)
            .with_employment_rate(1.0);
        let citizen = factory.spawn("Worker");
        assert_eq!(citizen.workplace, Some(BuildingId(1)));
        assert_eq!(citizen.home, Some(BuildingId(2)));
        assert_eq!(citizen.schedule.activity_at(10), Some("working"));
    }
}
