pub mod calendar;
pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use calendar::{Season, TimePeriod, WorldClock};
pub use config::BehaviorConfig;
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
