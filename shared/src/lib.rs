//! Shared types, models and the planting scheduling engine
//!
//! This crate contains the pure planning logic used by the backend and, via
//! WASM, by the browser client for offline previews.

pub mod models;
pub mod scheduling;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
