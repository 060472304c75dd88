//! Pattern evaluation - which catalog entries apply to a citizen right now

use crate::entity::citizen::Citizen;
use crate::rules::catalog::PatternCatalog;
use crate::rules::pattern::{BehaviorPattern, Condition, ConditionSubject};

/// Read the value a condition compares against
///
/// Total over every subject; unresolved subjects read 0.
pub fn resolve_subject(citizen: &Citizen, hour: u32, subject: &ConditionSubject) -> f32 {
    match subject {
        ConditionSubject::Need(key) => citizen.needs.get(*key),
        ConditionSubject::Mood(key) => citizen.mood.get(*key),
        ConditionSubject::Hour => hour as f32,
        ConditionSubject::RelationshipCount => citizen.relationship_count() as f32,
        ConditionSubject::Unresolved { .. } => 0.0,
    }
}

pub fn condition_holds(citizen: &Citizen, hour: u32, condition: &Condition) -> bool {
    let value = resolve_subject(citizen, hour, &condition.subject);
    condition.comparison.holds(value, condition.threshold)
}

/// A pattern applies when every one of its conditions holds
pub fn is_applicable(citizen: &Citizen, hour: u32, pattern: &BehaviorPattern) -> bool {
    pattern
        .conditions
        .iter()
        .all(|c| condition_holds(citizen, hour, c))
}

/// Evaluate the catalog against a citizen
/// Returns applicable patterns by descending priority, catalog order on ties
pub fn evaluate_patterns<'c>(
    citizen: &Citizen,
    hour: u32,
    catalog: &'c PatternCatalog,
) -> Vec<&'c BehaviorPattern> {
    let mut applicable: Vec<&BehaviorPattern> = catalog
        .patterns()
        .iter()
        .filter(|p| is_applicable(citizen, hour, p))
        .collect();

    // sort_by is stable
    applicable.sort_by(|a, b| b.priority.cmp(&a.priority));
    applicable
}
