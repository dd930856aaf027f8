//! Business logic services for the farm planner

pub mod planning;
pub mod snapshot;

pub use planning::PlanningService;
pub use snapshot::SnapshotService;
