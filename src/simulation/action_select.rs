//! Weighted pattern selection - the heart of autonomous behavior
//!
//! Each candidate's priority is damped by how often the citizen chose it
//! recently and jittered by the pattern's own variance. Highest weight wins.

use crate::core::random::RandomSource;
use crate::core::types::CitizenId;
use crate::rules::pattern::BehaviorPattern;
use crate::simulation::history::BehaviorHistory;

/// Floor for the repetition penalty
pub const MIN_HISTORY_MODIFIER: f32 = 0.3;
/// Penalty per recent use
pub const REPETITION_PENALTY: f32 = 0.2;

pub fn history_modifier(recent_uses: usize) -> f32 {
    (1.0 - recent_uses as f32 * REPETITION_PENALTY).max(MIN_HISTORY_MODIFIER)
}

pub fn variance_factor(variance: f32, roll: f32) -> f32 {
    1.0 + (roll - 0.5) * variance
}

/// Pick one pattern among the applicable candidates
///
/// A single candidate is returned without touching the random source. With
/// several, one roll is drawn per candidate in order and the first strict
/// maximum is kept.
pub fn select_pattern<'c>(
    citizen: CitizenId,
    candidates: &[&'c BehaviorPattern],
    history: &BehaviorHistory,
    window: usize,
    rng: &mut dyn RandomSource,
) -> Option<&'c BehaviorPattern> {
    match candidates {
        [] => None,
        [only] => Some(*only),
        _ => {
            let mut best: Option<(&BehaviorPattern, f32)> = None;
            for &pattern in candidates {
                let uses = history.recent_count(citizen, &pattern.id, window);
                let weight = pattern.priority as f32
                    * history_modifier(uses)
                    * variance_factor(pattern.variance, rng.random());

                tracing::trace!(pattern = %pattern.id, uses, weight, "Candidate weight");

                match best {
                    Some((_, top)) if weight <= top => {}
                    _ => best = Some((pattern, weight)),
                }
            }
            best.map(|(pattern, _)| pattern)
        }
    }
}
