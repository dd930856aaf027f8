//! Snapshot loading: reads the records one planning call needs

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    CropProfile, FarmSnapshot, Location, Occupancy, SellingCadence, SignalTables, YieldHistory,
    YieldSample,
};

use shared::validation::{validate_crop_profile, validate_line_dimensions};

use crate::error::{AppError, AppResult};

/// Loads read-only farm snapshots from PostgreSQL
#[derive(Clone)]
pub struct SnapshotService {
    db: PgPool,
}

/// Database row for an active line with its bed
#[derive(Debug, Clone, sqlx::FromRow)]
struct LocationRow {
    pub id: Uuid,
    pub name: String,
    pub bed_id: Uuid,
    pub bed_name: String,
    pub farm_id: Uuid,
    pub length_m: Option<Decimal>,
    pub width_m: Option<Decimal>,
    pub area_sqm: Option<Decimal>,
    pub is_active: bool,
}

impl TryFrom<LocationRow> for Location {
    type Error = AppError;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        validate_line_dimensions(row.length_m, row.width_m)
            .map_err(|e| AppError::Internal(format!("Line {}: {}", row.id, e)))?;

        let area_sqm = row
            .area_sqm
            .unwrap_or_else(|| Location::area_from_dimensions(row.length_m, row.width_m));
        Ok(Self {
            id: row.id,
            name: row.name,
            bed_id: row.bed_id,
            bed_name: row.bed_name,
            farm_id: row.farm_id,
            length_m: row.length_m,
            width_m: row.width_m,
            area_sqm,
            is_active: row.is_active,
        })
    }
}

/// Database row for a crop
#[derive(Debug, Clone, sqlx::FromRow)]
struct CropRow {
    pub id: Uuid,
    pub name: String,
    pub growth_cycle_days: i32,
    pub spacing_cm: Option<Decimal>,
    pub row_spacing_cm: Option<Decimal>,
    pub preferred_months: Option<Vec<i32>>,
    pub market_demand: Option<f64>,
    pub market_price_per_kg: Option<Decimal>,
    pub storage_life_days: Option<i32>,
    pub expected_yield_per_sqm: Option<Decimal>,
    pub is_active: bool,
}

impl TryFrom<CropRow> for CropProfile {
    type Error = AppError;

    fn try_from(row: CropRow) -> Result<Self, Self::Error> {
        let growth_cycle_days = u32::try_from(row.growth_cycle_days).map_err(|_| {
            AppError::Internal(format!(
                "Crop {} has a negative growth cycle ({} days)",
                row.id, row.growth_cycle_days
            ))
        })?;
        let preferred_months = row
            .preferred_months
            .unwrap_or_default()
            .into_iter()
            .map(|m| {
                u32::try_from(m).map_err(|_| {
                    AppError::Internal(format!("Crop {} has invalid month {}", row.id, m))
                })
            })
            .collect::<AppResult<Vec<u32>>>()?;
        let storage_life_days = row
            .storage_life_days
            .map(|d| {
                u32::try_from(d).map_err(|_| {
                    AppError::Internal(format!("Crop {} has a negative storage life", row.id))
                })
            })
            .transpose()?;

        let crop = Self {
            id: row.id,
            name: row.name,
            growth_cycle_days,
            spacing_cm: row.spacing_cm,
            row_spacing_cm: row.row_spacing_cm,
            preferred_months,
            market_demand: row.market_demand,
            market_price_per_kg: row.market_price_per_kg,
            storage_life_days,
            expected_yield_per_sqm: row.expected_yield_per_sqm,
            is_active: row.is_active,
        };
        validate_crop_profile(&crop)
            .map_err(|e| AppError::Internal(format!("Crop {}: {}", crop.id, e)))?;
        Ok(crop)
    }
}

/// Database row for a planting
#[derive(Debug, Clone, sqlx::FromRow)]
struct OccupancyRow {
    pub id: Uuid,
    pub line_id: Uuid,
    pub crop_id: Uuid,
    pub planted_date: NaiveDate,
    pub expected_harvest_date: Option<NaiveDate>,
    pub actual_harvest_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl From<OccupancyRow> for Occupancy {
    fn from(row: OccupancyRow) -> Self {
        Self {
            id: row.id,
            location_id: row.line_id,
            crop_id: row.crop_id,
            planted_date: row.planted_date,
            expected_harvest_date: row.expected_harvest_date,
            actual_harvest_date: row.actual_harvest_date,
            is_active: row.is_active,
        }
    }
}

/// Database row for a selling schedule
#[derive(Debug, Clone, sqlx::FromRow)]
struct CadenceRow {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub name: String,
    pub first_selling_date: NaiveDate,
    pub selling_frequency_days: i32,
    pub is_active: bool,
}

impl From<CadenceRow> for SellingCadence {
    fn from(row: CadenceRow) -> Self {
        Self {
            id: row.id,
            farm_id: row.farm_id,
            name: row.name,
            first_selling_date: row.first_selling_date,
            frequency_days: i64::from(row.selling_frequency_days),
            is_active: row.is_active,
        }
    }
}

/// Database row for one harvested quantity
#[derive(Debug, Clone, sqlx::FromRow)]
struct YieldRow {
    pub crop_id: Uuid,
    pub harvested_quantity_kg: Decimal,
}

impl SnapshotService {
    /// Create a new SnapshotService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Load everything a planning call reads for one farm, or for all
    /// active farms when `farm_id` is `None`
    pub async fn load(
        &self,
        farm_id: Option<Uuid>,
        today: NaiveDate,
        yield_window_days: i64,
        signals: SignalTables,
    ) -> AppResult<FarmSnapshot> {
        let locations = self.get_active_locations(farm_id).await?;
        let occupancies = self.get_active_occupancies(farm_id).await?;
        let crops = self.get_active_crops().await?;
        let cadences = self.get_selling_schedules(farm_id).await?;
        let since = today
            .checked_sub_days(Days::new(yield_window_days.max(0).unsigned_abs()))
            .unwrap_or(NaiveDate::MIN);
        let yield_history = self.get_yield_history(farm_id, since).await?;

        tracing::debug!(
            farm_id = ?farm_id,
            locations = locations.len(),
            occupancies = occupancies.len(),
            crops = crops.len(),
            cadences = cadences.len(),
            yield_samples = yield_history.samples.len(),
            "Loaded farm snapshot"
        );

        Ok(FarmSnapshot {
            locations,
            occupancies,
            crops,
            cadences,
            yield_history,
            signals,
        })
    }

    /// Active lines whose bed and farm are active too
    pub async fn get_active_locations(&self, farm_id: Option<Uuid>) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, LocationRow>(
            r#"
            SELECT l.id, l.name, l.bed_id, b.name as bed_name, b.farm_id,
                   l.length_m, l.width_m, l.area_sqm, l.is_active
            FROM lines l
            JOIN beds b ON b.id = l.bed_id
            JOIN farms f ON f.id = b.farm_id
            WHERE l.is_active = TRUE
              AND b.is_active = TRUE
              AND f.is_active = TRUE
              AND ($1::uuid IS NULL OR f.id = $1)
            ORDER BY b.name, l.position, l.name
            "#,
        )
        .bind(farm_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Location::try_from).collect()
    }

    /// Active plantings
    pub async fn get_active_occupancies(&self, farm_id: Option<Uuid>) -> AppResult<Vec<Occupancy>> {
        let rows = sqlx::query_as::<_, OccupancyRow>(
            r#"
            SELECT id, line_id, crop_id, planted_date, expected_harvest_date,
                   actual_harvest_date, is_active
            FROM plantings
            WHERE is_active = TRUE
              AND ($1::uuid IS NULL OR farm_id = $1)
            ORDER BY planted_date, id
            "#,
        )
        .bind(farm_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Occupancy::from).collect())
    }

    /// Active crop profiles in declaration order
    pub async fn get_active_crops(&self) -> AppResult<Vec<CropProfile>> {
        let rows = sqlx::query_as::<_, CropRow>(
            r#"
            SELECT id, name, growth_cycle_days, spacing_cm, row_spacing_cm,
                   preferred_months, market_demand, market_price_per_kg,
                   storage_life_days, expected_yield_per_sqm, is_active
            FROM crops
            WHERE is_active = TRUE
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(CropProfile::try_from).collect()
    }

    /// Selling schedules of the farm scope
    pub async fn get_selling_schedules(
        &self,
        farm_id: Option<Uuid>,
    ) -> AppResult<Vec<SellingCadence>> {
        let rows = sqlx::query_as::<_, CadenceRow>(
            r#"
            SELECT id, farm_id, name, first_selling_date, selling_frequency_days, is_active
            FROM selling_schedules
            WHERE ($1::uuid IS NULL OR farm_id = $1)
            ORDER BY first_selling_date, id
            "#,
        )
        .bind(farm_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SellingCadence::from).collect())
    }

    /// Harvested quantities recorded on or after `since`
    pub async fn get_yield_history(
        &self,
        farm_id: Option<Uuid>,
        since: NaiveDate,
    ) -> AppResult<YieldHistory> {
        let rows = sqlx::query_as::<_, YieldRow>(
            r#"
            SELECT crop_id, harvested_quantity_kg
            FROM harvests
            WHERE harvest_date >= $2
              AND ($1::uuid IS NULL OR farm_id = $1)
            ORDER BY harvest_date
            "#,
        )
        .bind(farm_id)
        .bind(since)
        .fetch_all(&self.db)
        .await?;

        Ok(YieldHistory::new(
            rows.into_iter()
                .map(|row| YieldSample {
                    crop_id: row.crop_id,
                    quantity_kg: row.harvested_quantity_kg,
                })
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop_row() -> CropRow {
        CropRow {
            id: Uuid::new_v4(),
            name: "Lettuce".to_string(),
            growth_cycle_days: 45,
            spacing_cm: Some(Decimal::from(25)),
            row_spacing_cm: Some(Decimal::from(30)),
            preferred_months: Some(vec![3, 4, 9]),
            market_demand: Some(0.8),
            market_price_per_kg: Some(Decimal::new(350, 2)),
            storage_life_days: Some(10),
            expected_yield_per_sqm: Some(Decimal::from(2)),
            is_active: true,
        }
    }

    #[test]
    fn test_crop_row_conversion() {
        let crop = CropProfile::try_from(crop_row()).unwrap();
        assert_eq!(crop.growth_cycle_days, 45);
        assert_eq!(crop.preferred_months, vec![3, 4, 9]);
        assert_eq!(crop.storage_life_days, Some(10));
    }

    #[test]
    fn test_crop_row_rejects_negative_cycle() {
        let mut row = crop_row();
        row.growth_cycle_days = -1;
        assert!(CropProfile::try_from(row).is_err());
    }

    #[test]
    fn test_crop_row_rejects_month_out_of_range() {
        let mut row = crop_row();
        row.preferred_months = Some(vec![3, 13]);
        assert!(matches!(CropProfile::try_from(row), Err(AppError::Internal(_))));

        let mut row = crop_row();
        row.preferred_months = Some(vec![0]);
        assert!(CropProfile::try_from(row).is_err());
    }

    #[test]
    fn test_crop_row_rejects_negative_storage_life() {
        let mut row = crop_row();
        row.storage_life_days = Some(-3);
        assert!(CropProfile::try_from(row).is_err());
    }

    #[test]
    fn test_crop_row_rejects_demand_out_of_range() {
        let mut row = crop_row();
        row.market_demand = Some(1.5);
        assert!(CropProfile::try_from(row).is_err());
    }

    #[test]
    fn test_crop_row_missing_months_means_any() {
        let mut row = crop_row();
        row.preferred_months = None;
        let crop = CropProfile::try_from(row).unwrap();
        assert!(crop.preferred_months.is_empty());
    }

    #[test]
    fn test_location_area_falls_back_to_dimensions() {
        let row = LocationRow {
            id: Uuid::new_v4(),
            name: "Line 1".to_string(),
            bed_id: Uuid::new_v4(),
            bed_name: "Bed A".to_string(),
            farm_id: Uuid::new_v4(),
            length_m: Some(Decimal::from(12)),
            width_m: Some(Decimal::new(5, 1)),
            area_sqm: None,
            is_active: true,
        };
        assert_eq!(Location::try_from(row.clone()).unwrap().area_sqm, Decimal::from(6));

        let mut negative = row;
        negative.width_m = Some(Decimal::new(-5, 1));
        assert!(Location::try_from(negative).is_err());
    }

    #[test]
    fn test_cadence_row_conversion() {
        let row = CadenceRow {
            id: Uuid::new_v4(),
            farm_id: Uuid::new_v4(),
            name: "Farmers market".to_string(),
            first_selling_date: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
            selling_frequency_days: 7,
            is_active: true,
        };
        assert_eq!(SellingCadence::from(row).frequency_days, 7);
    }
}
