//! Harvest history used as a yield signal

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One observed harvest quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldSample {
    pub crop_id: Uuid,
    pub quantity_kg: Decimal,
}

/// Harvest quantities observed over a recent window (e.g. the last 90 days)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct YieldHistory {
    pub samples: Vec<YieldSample>,
}

impl YieldHistory {
    pub fn new(samples: Vec<YieldSample>) -> Self {
        Self { samples }
    }

    /// Mean observed quantity for a crop, `None` without samples
    pub fn average_for(&self, crop_id: Uuid) -> Option<f64> {
        let (total, count) = self
            .samples
            .iter()
            .filter(|s| s.crop_id == crop_id)
            .fold((Decimal::ZERO, 0u32), |(total, count), s| {
                (total + s.quantity_kg, count + 1)
            });
        if count == 0 {
            return None;
        }
        (total / Decimal::from(count)).to_f64()
    }
}
