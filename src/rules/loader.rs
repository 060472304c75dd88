//! Load behavior pattern catalogs from TOML files
//!
//! ```toml
//! [[patterns]]
//! id = "seek_food"
//! name = "Find Food"
//! priority = 80
//! cooldown = 2
//! variance = 0.2
//! conditions = [{ type = "need", property = "food", operator = "<", value = 40 }]
//! actions = [{ type = "seek_food", target = "nearest_food_source", duration = 1 }]
//! ```

use std::fs;
use std::path::Path;

use crate::core::error::{CivicError, Result};
use crate::entity::mood::MoodKey;
use crate::entity::needs::NeedKey;
use crate::rules::catalog::PatternCatalog;
use crate::rules::pattern::{
    ActionKind, BehaviorPattern, Comparison, Condition, ConditionSubject, PatternAction,
    TargetKind,
};

/// Load a pattern catalog from a TOML file
pub fn load_catalog(path: &Path) -> Result<PatternCatalog> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Parse a pattern catalog from TOML text
pub fn parse_catalog(content: &str) -> Result<PatternCatalog> {
    let toml: toml::Value = content.parse()?;

    let entries = toml
        .get("patterns")
        .and_then(|v| v.as_array())
        .ok_or_else(|| CivicError::CatalogError("missing [[patterns]] array".into()))?;

    let mut patterns = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        patterns.push(parse_pattern(entry, index)?);
    }

    let catalog = PatternCatalog::new(patterns);
    catalog
        .validate()
        .map_err(|errors| CivicError::CatalogError(errors.join("; ")))?;

    tracing::debug!(patterns = catalog.len(), "Loaded behavior catalog");
    Ok(catalog)
}

fn parse_pattern(entry: &toml::Value, index: usize) -> Result<BehaviorPattern> {
    let id = entry
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CivicError::CatalogError(format!("pattern #{} has no id", index)))?;

    let name = entry.get("name").and_then(|v| v.as_str()).unwrap_or(id);
    let priority: i32 = read_integer(entry, "priority", id)?.unwrap_or(0);
    let cooldown: u32 = read_integer(entry, "cooldown", id)?.unwrap_or(0);

    let mut pattern = BehaviorPattern::new(id, name, priority)
        .with_cooldown(cooldown)
        .with_variance(read_number(entry, "variance").unwrap_or(0.0));

    if let Some(conditions) = entry.get("conditions").and_then(|v| v.as_array()) {
        for condition in conditions {
            pattern = pattern.when(parse_condition(condition, id)?);
        }
    }

    if let Some(actions) = entry.get("actions").and_then(|v| v.as_array()) {
        for action in actions {
            pattern = pattern.then(parse_action(action, id)?);
        }
    }

    Ok(pattern)
}

fn parse_condition(value: &toml::Value, pattern_id: &str) -> Result<Condition> {
    let domain = value.get("type").and_then(|v| v.as_str()).unwrap_or("");
    let property = value.get("property").and_then(|v| v.as_str()).unwrap_or("");

    let operator = value.get("operator").and_then(|v| v.as_str()).unwrap_or("");
    let comparison = Comparison::parse(operator).ok_or_else(|| {
        CivicError::CatalogError(format!(
            "{}: unknown operator '{}'",
            pattern_id, operator
        ))
    })?;

    let threshold = read_number(value, "value").ok_or_else(|| {
        CivicError::CatalogError(format!("{}: condition without numeric value", pattern_id))
    })?;

    let subject = resolve_subject(domain, property);
    if let ConditionSubject::Unresolved { domain, property } = &subject {
        tracing::warn!(
            pattern = pattern_id,
            domain = %domain,
            property = %property,
            "Unknown condition property, it will always read 0"
        );
    }

    Ok(Condition::new(subject, comparison, threshold))
}

/// Map a (domain, property) pair onto a typed subject
pub fn resolve_subject(domain: &str, property: &str) -> ConditionSubject {
    let resolved = match domain {
        "need" => NeedKey::parse(property).map(ConditionSubject::Need),
        "mood" => MoodKey::parse(property).map(ConditionSubject::Mood),
        "time" if property == "hour" => Some(ConditionSubject::Hour),
        "social" => Some(ConditionSubject::RelationshipCount),
        _ => None,
    };

    resolved.unwrap_or_else(|| ConditionSubject::Unresolved {
        domain: domain.to_string(),
        property: property.to_string(),
    })
}

fn parse_action(value: &toml::Value, pattern_id: &str) -> Result<PatternAction> {
    let kind_name = value.get("type").and_then(|v| v.as_str()).unwrap_or("");
    let kind = ActionKind::parse(kind_name).ok_or_else(|| {
        CivicError::CatalogError(format!(
            "{}: unknown action type '{}'",
            pattern_id, kind_name
        ))
    })?;

    let mut action = PatternAction::new(kind);

    if let Some(label) = value.get("target").and_then(|v| v.as_str()) {
        let target = TargetKind::parse(label);
        if let TargetKind::Other(label) = &target {
            tracing::warn!(
                pattern = pattern_id,
                target = %label,
                "Unknown action target, goals will stay at the current location"
            );
        }
        action = action.toward(target);
    }
    if let Some(duration) = read_integer(value, "duration", pattern_id)? {
        action = action.lasting(duration);
    }
    action.priority = read_integer(value, "priority", pattern_id)?;

    Ok(action)
}

/// Optional integer field that must be a TOML integer fitting in `T`
fn read_integer<T: TryFrom<i64>>(value: &toml::Value, key: &str, pattern_id: &str) -> Result<Option<T>> {
    let Some(field) = value.get(key) else {
        return Ok(None);
    };
    let raw = field.as_integer().ok_or_else(|| {
        CivicError::CatalogError(format!("{}: {} must be an integer, got {}", pattern_id, key, field))
    })?;
    T::try_from(raw).map(Some).map_err(|_| {
        CivicError::CatalogError(format!("{}: {} out of range ({})", pattern_id, key, raw))
    })
}

/// TOML distinguishes integers from floats; thresholds accept either
fn read_number(value: &toml::Value, key: &str) -> Option<f32> {
    let field = value.get(key)?;
    field
        .as_float()
        .or_else(|| field.as_integer().map(|i| i as f64))
        .map(|f| f as f32)
}
