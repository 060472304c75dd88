//! City layer - read-only snapshots of buildings, resources and city events

pub mod ledger;
pub mod snapshot;
pub mod view;

pub use ledger::ResourceLedger;
pub use snapshot::{BuildingCondition, BuildingKind, BuildingSnapshot};
pub use view::{CityEventKind, CityView};
