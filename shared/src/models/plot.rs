//! Growing locations: the lines within a farm's beds

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A plantable line inside a bed. The unit of occupancy tracking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub bed_id: Uuid,
    pub bed_name: String,
    pub farm_id: Uuid,
    pub length_m: Option<Decimal>,
    pub width_m: Option<Decimal>,
    /// Usable area in m², fixed when the line was created
    pub area_sqm: Decimal,
    pub is_active: bool,
}

impl Location {
    /// Create an active location with no recorded dimensions
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        bed_id: Uuid,
        bed_name: impl Into<String>,
        farm_id: Uuid,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            bed_id,
            bed_name: bed_name.into(),
            farm_id,
            length_m: None,
            width_m: None,
            area_sqm: Decimal::ZERO,
            is_active: true,
        }
    }

    /// Record the line's dimensions and derive its area
    pub fn with_dimensions(mut self, length_m: Decimal, width_m: Decimal) -> Self {
        self.length_m = Some(length_m);
        self.width_m = Some(width_m);
        self.area_sqm = Self::area_from_dimensions(Some(length_m), Some(width_m));
        self
    }

    /// Area = length × width, zero when either side is unknown
    pub fn area_from_dimensions(length_m: Option<Decimal>, width_m: Option<Decimal>) -> Decimal {
        match (length_m, width_m) {
            (Some(length), Some(width)) if length > Decimal::ZERO && width > Decimal::ZERO => {
                length * width
            }
            _ => Decimal::ZERO,
        }
    }
}
