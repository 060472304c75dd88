//! Resource ledger - named city-wide quantities
//!
//! The ledger is owned by the economy simulation; the behavior core only
//! reads it.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceLedger {
    quantities: AHashMap<String, f32>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used when assembling a snapshot
    pub fn with(mut self, name: impl Into<String>, amount: f32) -> Self {
        self.quantities.insert(name.into(), amount);
        self
    }

    /// Current amount, 0 for unknown resources
    pub fn get(&self, name: &str) -> f32 {
        self.quantities.get(name).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.quantities.contains_key(name)
    }
}
