//! Declarative behavior patterns and the catalogs that hold them

pub mod catalog;
pub mod loader;
pub mod pattern;

pub use catalog::PatternCatalog;
pub use loader::{load_catalog, parse_catalog};
pub use pattern::{
    ActionKind, BehaviorPattern, Comparison, Condition, ConditionSubject, PatternAction,
    TargetKind,
};
