pub mod citizen;
pub mod life_events;
pub mod mood;
pub mod needs;
pub mod personality;
pub mod relationships;
pub mod schedule;

pub use citizen::{Citizen, CitizenFactory, Gender, Preferences, WorkStyle};
pub use life_events::{LifeEventKind, LifeEventRecord};
pub use mood::{Mood, MoodContext, MoodDelta, MoodKey};
pub use needs::{NeedKey, Needs};
pub use personality::Personality;
pub use relationships::{InteractionOutcome, InteractionRecord, RelationType, Relationship};
pub use schedule::{Schedule, ScheduleBlock};
