//! Behavior pattern definitions

use serde::{Deserialize, Serialize};

use crate::entity::mood::MoodKey;
use crate::entity::needs::NeedKey;

/// Comparison operator used by a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Less,
    Greater,
    Equal,
    LessOrEqual,
    GreaterOrEqual,
}

impl Comparison {
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "<" => Some(Comparison::Less),
            ">" => Some(Comparison::Greater),
            "==" => Some(Comparison::Equal),
            "<=" => Some(Comparison::LessOrEqual),
            ">=" => Some(Comparison::GreaterOrEqual),
            _ => None,
        }
    }

    pub fn holds(&self, value: f32, threshold: f32) -> bool {
        match self {
            Comparison::Less => value < threshold,
            Comparison::Greater => value > threshold,
            Comparison::Equal => (value - threshold).abs() < f32::EPSILON,
            Comparison::LessOrEqual => value <= threshold,
            Comparison::GreaterOrEqual => value >= threshold,
        }
    }
}

/// What a condition reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionSubject {
    Need(NeedKey),
    Mood(MoodKey),
    /// Current hour of day
    Hour,
    /// Number of relationships the citizen has
    RelationshipCount,
    /// A property name the catalog could not resolve; always reads 0
    Unresolved { domain: String, property: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub subject: ConditionSubject,
    pub comparison: Comparison,
    pub threshold: f32,
}

impl Condition {
    pub fn new(subject: ConditionSubject, comparison: Comparison, threshold: f32) -> Self {
        Self {
            subject,
            comparison,
            threshold,
        }
    }

    pub fn need(key: NeedKey, comparison: Comparison, threshold: f32) -> Self {
        Self::new(ConditionSubject::Need(key), comparison, threshold)
    }

    pub fn mood(key: MoodKey, comparison: Comparison, threshold: f32) -> Self {
        Self::new(ConditionSubject::Mood(key), comparison, threshold)
    }

    pub fn hour(comparison: Comparison, threshold: f32) -> Self {
        Self::new(ConditionSubject::Hour, comparison, threshold)
    }

    pub fn relationships(comparison: Comparison, threshold: f32) -> Self {
        Self::new(ConditionSubject::RelationshipCount, comparison, threshold)
    }
}

/// What the citizen does once a pattern is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    SeekFood,
    SeekShelter,
    Work,
    Socialize,
    Rest,
    Relax,
    Explore,
}

impl ActionKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "seek_food" => Some(ActionKind::SeekFood),
            "seek_shelter" => Some(ActionKind::SeekShelter),
            "work" => Some(ActionKind::Work),
            "socialize" => Some(ActionKind::Socialize),
            "rest" => Some(ActionKind::Rest),
            "relax" => Some(ActionKind::Relax),
            "explore" => Some(ActionKind::Explore),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::SeekFood => "seek_food",
            ActionKind::SeekShelter => "seek_shelter",
            ActionKind::Work => "work",
            ActionKind::Socialize => "socialize",
            ActionKind::Rest => "rest",
            ActionKind::Relax => "relax",
            ActionKind::Explore => "explore",
        }
    }

    /// Need restored when the citizen completes this action
    pub fn need_restoration(&self) -> Option<(NeedKey, f32)> {
        match self {
            ActionKind::SeekFood => Some((NeedKey::Food, 30.0)),
            ActionKind::SeekShelter => Some((NeedKey::Shelter, 25.0)),
            ActionKind::Work => Some((NeedKey::Purpose, 20.0)),
            ActionKind::Socialize => Some((NeedKey::Social, 20.0)),
            ActionKind::Explore => Some((NeedKey::Purpose, 5.0)),
            ActionKind::Rest | ActionKind::Relax => None,
        }
    }

    /// Energy recovered when the citizen completes this action
    pub fn energy_restoration(&self) -> f32 {
        match self {
            ActionKind::Rest => 25.0,
            ActionKind::Relax => 10.0,
            _ => 0.0,
        }
    }
}

/// Where an action wants to take the citizen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    NearestFoodSource,
    OptimalWorkplace,
    SocialHub,
    WorkplaceWithColleagues,
    RestLocation,
    /// A label the goal synthesizer has no resolver for
    Other(String),
}

impl TargetKind {
    pub fn parse(label: &str) -> Self {
        match label {
            "nearest_food_source" => TargetKind::NearestFoodSource,
            "optimal_workplace" => TargetKind::OptimalWorkplace,
            "social_hub" => TargetKind::SocialHub,
            "workplace_with_colleagues" => TargetKind::WorkplaceWithColleagues,
            "home" => TargetKind::RestLocation,
            other => TargetKind::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TargetKind::NearestFoodSource => "nearest_food_source",
            TargetKind::OptimalWorkplace => "optimal_workplace",
            TargetKind::SocialHub => "social_hub",
            TargetKind::WorkplaceWithColleagues => "workplace_with_colleagues",
            TargetKind::RestLocation => "home",
            TargetKind::Other(label) => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAction {
    pub kind: ActionKind,
    pub target: Option<TargetKind>,
    /// Expected duration in cycles
    pub duration: Option<u32>,
    pub priority: Option<i32>,
}

impl PatternAction {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            target: None,
            duration: None,
            priority: None,
        }
    }

    pub fn toward(mut self, target: TargetKind) -> Self {
        self.target = Some(target);
        self
    }

    pub fn lasting(mut self, cycles: u32) -> Self {
        self.duration = Some(cycles);
        self
    }
}

/// A declarative rule: all conditions gate applicability, the first action
/// drives the resulting goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorPattern {
    pub id: String,
    pub name: String,
    pub priority: i32,
    pub conditions: Vec<Condition>,
    pub actions: Vec<PatternAction>,
    /// Advisory only; the evaluator does not enforce it
    pub cooldown: u32,
    /// 0.0..=1.0 randomization strength during weighted selection
    pub variance: f32,
}

impl BehaviorPattern {
    pub fn new(id: impl Into<String>, name: impl Into<String>, priority: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority,
            conditions: Vec::new(),
            actions: Vec::new(),
            cooldown: 0,
            variance: 0.0,
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn then(mut self, action: PatternAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_cooldown(mut self, cycles: u32) -> Self {
        self.cooldown = cycles;
        self
    }

    pub fn with_variance(mut self, variance: f32) -> Self {
        self.variance = variance.clamp(0.0, 1.0);
        self
    }

    pub fn primary_action(&self) -> Option<&PatternAction> {
        self.actions.first()
    }
}
