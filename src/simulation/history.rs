//! Bounded per-citizen behavior history
//!
//! Each tracked citizen gets a ring of recent pattern choices. The selector
//! reads it to penalize repetition; activity completion writes the outcome
//! back onto the newest entry.

use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::core::types::{CitizenId, Cycle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorHistoryEntry {
    pub pattern_id: String,
    pub cycle: Cycle,
    /// Unknown until the activity concludes
    pub success: Option<bool>,
    pub satisfaction: Option<f32>,
}

impl BehaviorHistoryEntry {
    pub fn new(pattern_id: impl Into<String>, cycle: Cycle) -> Self {
        Self {
            pattern_id: pattern_id.into(),
            cycle,
            success: None,
            satisfaction: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BehaviorHistory {
    capacity: usize,
    entries: BTreeMap<CitizenId, VecDeque<BehaviorHistoryEntry>>,
}

impl Default for BehaviorHistory {
    fn default() -> Self {
        Self::new(50)
    }
}

impl BehaviorHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an entry, evicting the oldest once the cap is reached
    pub fn record(&mut self, citizen: CitizenId, entry: BehaviorHistoryEntry) {
        let log = self.entries.entry(citizen).or_default();
        log.push_back(entry);
        while log.len() > self.capacity {
            log.pop_front();
        }
    }

    /// Write the outcome of the newest entry; no-op for untracked citizens
    pub fn update_latest(&mut self, citizen: CitizenId, success: bool, satisfaction: f32) {
        if let Some(entry) = self.entries.get_mut(&citizen).and_then(|log| log.back_mut()) {
            entry.success = Some(success);
            entry.satisfaction = Some(satisfaction);
        }
    }

    pub fn latest(&self, citizen: CitizenId) -> Option<&BehaviorHistoryEntry> {
        self.entries.get(&citizen).and_then(|log| log.back())
    }

    /// Every entry, oldest first
    pub fn all(&self, citizen: CitizenId) -> Option<&VecDeque<BehaviorHistoryEntry>> {
        self.entries.get(&citizen)
    }

    /// Up to `n` newest entries, oldest first
    pub fn recent(&self, citizen: CitizenId, n: usize) -> Vec<&BehaviorHistoryEntry> {
        match self.entries.get(&citizen) {
            Some(log) => log.iter().skip(log.len().saturating_sub(n)).collect(),
            None => Vec::new(),
        }
    }

    /// How often `pattern_id` shows up in the newest `window` entries
    pub fn recent_count(&self, citizen: CitizenId, pattern_id: &str, window: usize) -> usize {
        self.recent(citizen, window)
            .iter()
            .filter(|e| e.pattern_id == pattern_id)
            .count()
    }

    pub fn reset(&mut self, citizen: CitizenId) {
        self.entries.remove(&citizen);
    }

    /// Drop logs for citizens no longer in `active`
    pub fn prune(&mut self, active: &HashSet<CitizenId>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, _| active.contains(id));
        before - self.entries.len()
    }

    pub fn tracked(&self) -> usize {
        self.entries.len()
    }
}
