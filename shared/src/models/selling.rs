//! Recurring selling schedules

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring market day: first date plus a fixed frequency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SellingCadence {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub name: String,
    pub first_selling_date: NaiveDate,
    /// Days between sales; only positive values are usable
    pub frequency_days: i64,
    pub is_active: bool,
}
