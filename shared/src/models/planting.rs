//! Plantings that occupy a location over a date interval

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DateWindow;

/// A crop growing (or reserved to grow) in a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Occupancy {
    pub id: Uuid,
    pub location_id: Uuid,
    pub crop_id: Uuid,
    pub planted_date: NaiveDate,
    pub expected_harvest_date: Option<NaiveDate>,
    pub actual_harvest_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl Occupancy {
    /// Actual harvest date when recorded, otherwise the expected one
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.actual_harvest_date.or(self.expected_harvest_date)
    }

    /// Active and not yet harvested
    pub fn is_growing(&self) -> bool {
        self.is_active && self.actual_harvest_date.is_none()
    }

    /// Whether this occupancy reserves any day of `window`.
    ///
    /// Inactive occupancies never block. An occupancy with no known end is
    /// open-ended and blocks every window finishing on or after its start.
    pub fn blocks(&self, window: &DateWindow) -> bool {
        if !self.is_active {
            return false;
        }
        match self.end_date() {
            Some(end) => DateWindow::new(self.planted_date, end).overlaps(window),
            None => self.planted_date <= window.end,
        }
    }
}

/// An expected harvest coming up within the dashboard lookahead
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingHarvest {
    pub occupancy_id: Uuid,
    pub crop_name: String,
    pub location_id: Uuid,
    pub location_name: String,
    pub bed_name: String,
    pub expected_harvest_date: NaiveDate,
    pub days_until_harvest: i64,
}
