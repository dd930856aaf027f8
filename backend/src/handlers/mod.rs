//! HTTP request handlers

pub mod health;
pub mod planning;

pub use health::health_check;
pub use planning::{get_dashboard, list_opportunities, plan_campaign};
