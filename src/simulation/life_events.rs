//! Life event engine - rare exogenous shocks to a citizen's life
//!
//! Event type depends on context: a dangerous city breeds conflict and
//! illness, a happy citizen tends toward promotions and friendships.

use crate::core::calendar::WorldClock;
use crate::core::random::RandomSource;
use crate::entity::citizen::Citizen;
use crate::entity::life_events::{LifeEventKind, LifeEventRecord};
use crate::entity::needs::NeedKey;

/// Pick an event type for the citizen's situation
pub fn choose_event_kind(
    threat_level: f32,
    happiness: f32,
    rng: &mut dyn RandomSource,
) -> LifeEventKind {
    if threat_level > 50.0 {
        if rng.random() < 0.6 {
            LifeEventKind::Conflict
        } else {
            LifeEventKind::Illness
        }
    } else if happiness > 70.0 {
        if rng.random() < 0.5 {
            LifeEventKind::Promotion
        } else {
            LifeEventKind::Friendship
        }
    } else {
        LifeEventKind::ALL[rng.pick_index(LifeEventKind::ALL.len())]
    }
}

fn describe(kind: LifeEventKind, name: &str, clock: &WorldClock) -> String {
    let period = clock.time_period().label();
    match kind {
        LifeEventKind::Promotion => format!("{} was promoted one {}", name, period),
        LifeEventKind::Illness => format!("{} fell ill during the {}", name, period),
        LifeEventKind::Friendship => format!("{} made a new friend one {}", name, period),
        LifeEventKind::Conflict => format!("{} got into a quarrel during the {}", name, period),
        LifeEventKind::Discovery => format!("{} discovered something new one {}", name, period),
    }
}

/// Apply an event's mood change and side effects, then log it
pub fn apply_life_event(
    citizen: &mut Citizen,
    kind: LifeEventKind,
    clock: &WorldClock,
) -> LifeEventRecord {
    let delta = kind.mood_delta();
    citizen.mood.apply(&delta);

    match kind {
        LifeEventKind::Promotion => citizen.income += 5.0,
        LifeEventKind::Friendship => citizen.needs.adjust(NeedKey::Social, 15.0),
        LifeEventKind::Conflict => citizen.needs.adjust(NeedKey::Social, -10.0),
        LifeEventKind::Illness | LifeEventKind::Discovery => {}
    }

    let record = LifeEventRecord {
        cycle: clock.cycle(),
        kind,
        description: describe(kind, &citizen.name, clock),
        mood_delta: delta,
    };
    citizen.life_events.push(record.clone());

    tracing::debug!(
        citizen = %citizen.id,
        event = kind.label(),
        cycle = record.cycle,
        "Life event"
    );
    record
}

/// Roll for a life event this cycle
pub fn roll_life_event(
    citizen: &mut Citizen,
    threat_level: f32,
    clock: &WorldClock,
    chance: f32,
    rng: &mut dyn RandomSource,
) -> Option<LifeEventRecord> {
    if rng.random() >= chance {
        return None;
    }
    let kind = choose_event_kind(threat_level, citizen.mood.happiness, rng);
    Some(apply_life_event(citizen, kind, clock))
}
