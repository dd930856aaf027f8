//! Crop growing profiles

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Growing and market information for a crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub id: Uuid,
    pub name: String,
    /// Days from planting to harvest
    pub growth_cycle_days: u32,
    /// Distance between plants in a row (cm)
    pub spacing_cm: Option<Decimal>,
    /// Distance between rows (cm)
    pub row_spacing_cm: Option<Decimal>,
    /// Calendar months (1-12) best suited for planting. Empty means any month.
    #[serde(default)]
    pub preferred_months: Vec<u32>,
    /// Market demand score 0.0-1.0
    pub market_demand: Option<f64>,
    pub market_price_per_kg: Option<Decimal>,
    pub storage_life_days: Option<u32>,
    /// Fallback yield (kg/m²) when no harvest history exists
    pub expected_yield_per_sqm: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl CropProfile {
    /// Create an active profile with no optional data
    pub fn new(id: Uuid, name: impl Into<String>, growth_cycle_days: u32) -> Self {
        Self {
            id,
            name: name.into(),
            growth_cycle_days,
            spacing_cm: None,
            row_spacing_cm: None,
            preferred_months: Vec::new(),
            market_demand: None,
            market_price_per_kg: None,
            storage_life_days: None,
            expected_yield_per_sqm: None,
            is_active: true,
        }
    }

    /// Whether planting in `month` fits this crop's preferred months
    pub fn suits_month(&self, month: u32) -> bool {
        self.preferred_months.is_empty() || self.preferred_months.contains(&month)
    }

    pub fn suits_date(&self, date: NaiveDate) -> bool {
        self.suits_month(date.month())
    }

    /// Plants per m² from in-row and between-row spacing
    pub fn plants_per_sqm(&self) -> Option<f64> {
        let spacing = self.spacing_cm?.to_f64()?;
        let row_spacing = self.row_spacing_cm?.to_f64()?;
        if spacing <= 0.0 || row_spacing <= 0.0 {
            return None;
        }
        Some(1.0 / ((spacing / 100.0) * (row_spacing / 100.0)))
    }

    /// Number of plants that fit `area_sqm`, never less than one
    pub fn plants_for_area(&self, area_sqm: Decimal) -> u32 {
        let Some(per_sqm) = self.plants_per_sqm() else {
            return 1;
        };
        let area = area_sqm.to_f64().unwrap_or(0.0);
        let total = (area * per_sqm).floor();
        if total < 1.0 {
            1
        } else {
            total.min(f64::from(u32::MAX)) as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spaced(spacing: i64, row_spacing: i64) -> CropProfile {
        let mut crop = CropProfile::new(Uuid::new_v4(), "Lettuce", 45);
        crop.spacing_cm = Some(Decimal::from(spacing));
        crop.row_spacing_cm = Some(Decimal::from(row_spacing));
        crop
    }

    #[test]
    fn test_plants_for_area_from_spacing() {
        // 25cm x 25cm = 16 plants per m²
        let crop = spaced(25, 25);
        assert_eq!(crop.plants_for_area(Decimal::from(10)), 160);
        assert_eq!(crop.plants_for_area(Decimal::new(25, 1)), 40);
    }

    #[test]
    fn test_plants_for_area_without_spacing_is_one() {
        let crop = CropProfile::new(Uuid::new_v4(), "Garlic", 240);
        assert_eq!(crop.plants_for_area(Decimal::from(10)), 1);
    }

    #[test]
    fn test_plants_for_tiny_area_is_at_least_one() {
        let crop = spaced(100, 100);
        assert_eq!(crop.plants_for_area(Decimal::new(5, 1)), 1);
        assert_eq!(crop.plants_for_area(Decimal::ZERO), 1);
    }

    #[test]
    fn test_suits_month() {
        let mut crop = CropProfile::new(Uuid::new_v4(), "Peas", 60);
        assert!(crop.suits_month(7));
        crop.preferred_months = vec![2, 3];
        assert!(crop.suits_month(3));
        assert!(!crop.suits_month(7));
    }
}
