//! Externally supplied market and seasonal lookup tables
//!
//! These replace hard-coded crop tables so they can be versioned or
//! loaded from configuration. Crop names match case-insensitively.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::CropProfile;
use crate::types::Season;

/// Demand used when neither the table nor the profile has a value
pub const DEFAULT_DEMAND: f64 = 0.5;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignalTables {
    /// Crop name to market demand (0.0-1.0)
    #[serde(default)]
    pub demand: HashMap<String, f64>,
    /// Crops preferred in each season
    #[serde(default)]
    pub seasonal: HashMap<Season, Vec<String>>,
    /// Crop name to growth cycle override in days
    #[serde(default)]
    pub growth_cycles: HashMap<String, u32>,
}

impl SignalTables {
    /// Table value, then the profile's own score, then [`DEFAULT_DEMAND`]
    pub fn demand_for(&self, crop: &CropProfile) -> f64 {
        lookup(&self.demand, &crop.name)
            .copied()
            .or(crop.market_demand)
            .unwrap_or(DEFAULT_DEMAND)
    }

    pub fn is_seasonal(&self, season: Season, crop: &CropProfile) -> bool {
        self.seasonal
            .get(&season)
            .map(|names| names.iter().any(|n| n.eq_ignore_ascii_case(&crop.name)))
            .unwrap_or(false)
    }

    pub fn growth_cycle_for(&self, crop: &CropProfile) -> u32 {
        lookup(&self.growth_cycles, &crop.name)
            .copied()
            .unwrap_or(crop.growth_cycle_days)
    }
}

fn lookup<'a, V>(table: &'a HashMap<String, V>, name: &str) -> Option<&'a V> {
    table.get(name).or_else(|| {
        table
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}
