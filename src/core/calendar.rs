//! World clock view for time-of-day tracking
//!
//! The clock itself is owned by the host game; this module only derives the
//! hour, cycle and season tags the behavior core reads each tick.

use serde::{Deserialize, Serialize};

use crate::core::types::Cycle;

/// Days in each season of the in-game year
pub const DAYS_PER_SEASON: u64 = 30;

/// Time of day periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    Morning,    // 06:00-12:00
    Afternoon,  // 12:00-18:00
    Evening,    // 18:00-22:00
    Night,      // 22:00-06:00
}

impl TimePeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimePeriod::Morning,
            12..=17 => TimePeriod::Afternoon,
            18..=21 => TimePeriod::Evening,
            _ => TimePeriod::Night, // 22-23, 0-5
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::Morning => "morning",
            TimePeriod::Afternoon => "afternoon",
            TimePeriod::Evening => "evening",
            TimePeriod::Night => "night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn from_day(day: u64) -> Self {
        match (day / DAYS_PER_SEASON) % 4 {
            0 => Season::Spring,
            1 => Season::Summer,
            2 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

/// Read-only snapshot of the world clock for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldClock {
    total_minutes: u64,
}

impl WorldClock {
    pub fn from_total_minutes(total_minutes: u64) -> Self {
        Self { total_minutes }
    }

    pub fn at_cycle(cycle: Cycle) -> Self {
        Self::from_total_minutes(cycle * 60)
    }

    /// Monotonic in-game cycle counter: floor(total minutes / 60)
    pub fn cycle(&self) -> Cycle {
        self.total_minutes / 60
    }

    pub fn hour(&self) -> u32 {
        (self.cycle() % 24) as u32
    }

    pub fn day(&self) -> u64 {
        self.cycle() / 24
    }

    pub fn time_period(&self) -> TimePeriod {
        TimePeriod::from_hour(self.hour())
    }

    pub fn season(&self) -> Season {
        Season::from_day(self.day())
    }

    /// The clock one cycle later
    pub fn next(&self) -> Self {
        Self::from_total_minutes(self.total_minutes + 60)
    }
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::from_total_minutes(0)
    }
}
