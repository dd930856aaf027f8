//! Read-only farm snapshot handed to the engine

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CropProfile, Location, Occupancy, SellingCadence, SignalTables, YieldHistory};

/// Everything one engine call reads. Callers pass only active locations
/// whose bed and farm are active too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FarmSnapshot {
    pub locations: Vec<Location>,
    #[serde(default)]
    pub occupancies: Vec<Occupancy>,
    pub crops: Vec<CropProfile>,
    #[serde(default)]
    pub cadences: Vec<SellingCadence>,
    #[serde(default)]
    pub yield_history: YieldHistory,
    #[serde(default)]
    pub signals: SignalTables,
}

impl FarmSnapshot {
    /// Occupancies grouped by location id, preserving input order
    pub fn occupancies_by_location(&self) -> HashMap<Uuid, Vec<&Occupancy>> {
        let mut index: HashMap<Uuid, Vec<&Occupancy>> = HashMap::new();
        for occupancy in &self.occupancies {
            index.entry(occupancy.location_id).or_default().push(occupancy);
        }
        index
    }

    /// Farm-wide count of active plantings of a crop
    pub fn active_count(&self, crop_id: Uuid) -> usize {
        self.occupancies
            .iter()
            .filter(|o| o.crop_id == crop_id && o.is_active)
            .count()
    }

    pub fn crop(&self, crop_id: Uuid) -> Option<&CropProfile> {
        self.crops.iter().find(|c| c.id == crop_id)
    }

    pub fn location(&self, location_id: Uuid) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == location_id)
    }

    pub fn cadence(&self, cadence_id: Uuid) -> Option<&SellingCadence> {
        self.cadences.iter().find(|c| c.id == cadence_id)
    }
}
