//! Domain models for the farm planner
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
