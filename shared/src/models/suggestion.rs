//! Engine output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Priority;

/// A ranked planting suggestion. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub location_id: Uuid,
    pub location_name: String,
    pub bed_name: String,
    pub crop_id: Uuid,
    pub crop_name: String,
    pub planting_date: NaiveDate,
    pub expected_harvest_date: NaiveDate,
    pub score: f64,
    pub priority: Priority,
    pub market_demand: f64,
    pub suggested_quantity: u32,
    pub reason: String,
}
