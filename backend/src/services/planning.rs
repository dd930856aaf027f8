//! Planning service: loads a snapshot and runs the scheduling engine over it

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::{FarmSnapshot, SignalTables, Suggestion, UpcomingHarvest};
use shared::scheduling::{
    find_available_now, next_selling_date, recommend_campaign, recommend_now, upcoming_harvests,
    CampaignRequest,
};
use shared::Priority;

use crate::config::SchedulerConfig;
use crate::error::AppResult;
use crate::services::snapshot::SnapshotService;

/// Input for planning a campaign against a selling schedule
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CampaignInput {
    pub farm_id: Uuid,
    pub selling_schedule_id: Uuid,
    /// First selling date of the campaign
    pub target_date: NaiveDate,
    /// At most one sale a year
    #[validate(range(min = 1, max = 366))]
    pub frequency_days: i64,
}

impl From<CampaignInput> for CampaignRequest {
    fn from(input: CampaignInput) -> Self {
        Self {
            farm_id: input.farm_id,
            selling_schedule_id: input.selling_schedule_id,
            start_date: input.target_date,
            frequency_days: input.frequency_days,
        }
    }
}

/// Dashboard query parameters
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DashboardQuery {
    pub farm_id: Option<Uuid>,
    #[validate(range(min = 1, max = 52))]
    pub weeks_ahead: Option<u32>,
}

/// Opportunities query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpportunitiesQuery {
    pub farm_id: Option<Uuid>,
}

/// Headline counts for the dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub total_locations: usize,
    pub active_plantings: usize,
    pub available_locations: usize,
    pub upcoming_harvests: usize,
    pub high_priority_suggestions: usize,
    pub next_selling_date: Option<NaiveDate>,
    pub days_until_next_sale: Option<i64>,
}

/// Dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub upcoming_harvests: Vec<UpcomingHarvest>,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Clone)]
pub struct PlanningService {
    snapshots: SnapshotService,
    scheduler: SchedulerConfig,
    signals: SignalTables,
}

impl PlanningService {
    /// Create a new PlanningService instance
    pub fn new(db: PgPool, scheduler: SchedulerConfig, signals: SignalTables) -> Self {
        Self {
            snapshots: SnapshotService::new(db),
            scheduler,
            signals,
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    async fn snapshot(&self, farm_id: Option<Uuid>, today: NaiveDate) -> AppResult<FarmSnapshot> {
        self.snapshots
            .load(
                farm_id,
                today,
                self.scheduler.yield_window_days,
                self.signals.clone(),
            )
            .await
    }

    /// Best crop for each location that is free today
    pub async fn opportunities(&self, farm_id: Option<Uuid>) -> AppResult<Vec<Suggestion>> {
        let today = Self::today();
        let snapshot = self.snapshot(farm_id, today).await?;
        let suggestions = recommend_now(&snapshot, today);

        tracing::info!(
            farm_id = ?farm_id,
            suggestions = suggestions.len(),
            "Computed planting opportunities"
        );
        Ok(suggestions)
    }

    /// Planting plan that keeps a selling schedule supplied
    pub async fn campaign(&self, input: CampaignInput) -> AppResult<Vec<Suggestion>> {
        let today = Self::today();
        let snapshot = self.snapshot(Some(input.farm_id), today).await?;
        let request = CampaignRequest::from(input);
        let suggestions = recommend_campaign(&snapshot, &request, today)?;

        tracing::info!(
            farm_id = %request.farm_id,
            selling_schedule_id = %request.selling_schedule_id,
            suggestions = suggestions.len(),
            "Computed planting campaign"
        );
        Ok(suggestions)
    }

    /// Summary counts, upcoming harvests and current suggestions
    pub async fn dashboard(&self, query: DashboardQuery) -> AppResult<Dashboard> {
        let today = Self::today();
        let weeks_ahead = query
            .weeks_ahead
            .unwrap_or(self.scheduler.default_weeks_ahead);
        let snapshot = self.snapshot(query.farm_id, today).await?;

        Ok(build_dashboard(&snapshot, today, weeks_ahead))
    }
}

/// Assemble the dashboard from a loaded snapshot
pub fn build_dashboard(snapshot: &FarmSnapshot, today: NaiveDate, weeks_ahead: u32) -> Dashboard {
    let harvests = upcoming_harvests(snapshot, today, weeks_ahead);
    let suggestions = recommend_now(snapshot, today);
    let next_sale = next_selling_date(&snapshot.cadences, today);

    let summary = DashboardSummary {
        total_locations: snapshot.locations.len(),
        active_plantings: snapshot
            .occupancies
            .iter()
            .filter(|o| o.is_active)
            .count(),
        available_locations: find_available_now(
            &snapshot.locations,
            &snapshot.occupancies_by_location(),
        )
        .len(),
        upcoming_harvests: harvests.len(),
        high_priority_suggestions: suggestions
            .iter()
            .filter(|s| s.priority == Priority::High)
            .count(),
        next_selling_date: next_sale,
        days_until_next_sale: next_sale.map(|d| (d - today).num_days()),
    };

    Dashboard {
        summary,
        upcoming_harvests: harvests,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropProfile, Location, Occupancy, SellingCadence};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> FarmSnapshot {
        let farm_id = Uuid::new_v4();
        let bed_id = Uuid::new_v4();
        let free = Location::new(Uuid::new_v4(), "Line 1", bed_id, "Bed A", farm_id);
        let busy = Location::new(Uuid::new_v4(), "Line 2", bed_id, "Bed A", farm_id);
        let mut crop = CropProfile::new(Uuid::new_v4(), "Lettuce", 45);
        crop.market_demand = Some(0.9);

        let occupancy = Occupancy {
            id: Uuid::new_v4(),
            location_id: busy.id,
            crop_id: crop.id,
            planted_date: date(2024, 2, 1),
            expected_harvest_date: Some(date(2024, 3, 10)),
            actual_harvest_date: None,
            is_active: true,
        };
        let cadence = SellingCadence {
            id: Uuid::new_v4(),
            farm_id,
            name: "Saturday market".to_string(),
            first_selling_date: date(2024, 3, 2),
            frequency_days: 7,
            is_active: true,
        };

        FarmSnapshot {
            locations: vec![free, busy],
            occupancies: vec![occupancy],
            crops: vec![crop],
            cadences: vec![cadence],
            ..Default::default()
        }
    }

    #[test]
    fn test_dashboard_summary_counts() {
        let dashboard = build_dashboard(&snapshot(), date(2024, 3, 1), 2);

        assert_eq!(dashboard.summary.total_locations, 2);
        assert_eq!(dashboard.summary.active_plantings, 1);
        assert_eq!(dashboard.summary.available_locations, 1);
        assert_eq!(dashboard.summary.upcoming_harvests, 1);
        assert_eq!(dashboard.summary.next_selling_date, Some(date(2024, 3, 2)));
        assert_eq!(dashboard.summary.days_until_next_sale, Some(1));
        assert_eq!(dashboard.upcoming_harvests[0].days_until_harvest, 9);
    }

    #[test]
    fn test_dashboard_excludes_harvests_beyond_lookahead() {
        let dashboard = build_dashboard(&snapshot(), date(2024, 2, 1), 1);
        assert!(dashboard.upcoming_harvests.is_empty());
    }

    #[test]
    fn test_dashboard_query_validation() {
        let ok = DashboardQuery {
            farm_id: None,
            weeks_ahead: Some(4),
        };
        assert!(ok.validate().is_ok());

        let too_far = DashboardQuery {
            farm_id: None,
            weeks_ahead: Some(53),
        };
        assert!(too_far.validate().is_err());

        let zero = DashboardQuery {
            farm_id: None,
            weeks_ahead: Some(0),
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_available_locations_counted_without_crops() {
        let mut snapshot = snapshot();
        snapshot.crops.clear();
        let dashboard = build_dashboard(&snapshot, date(2024, 3, 1), 2);

        assert!(dashboard.suggestions.is_empty());
        assert_eq!(dashboard.summary.available_locations, 1);
    }

    #[test]
    fn test_campaign_input_validation() {
        let input = |frequency_days| CampaignInput {
            farm_id: Uuid::new_v4(),
            selling_schedule_id: Uuid::new_v4(),
            target_date: date(2024, 6, 1),
            frequency_days,
        };

        assert!(input(1).validate().is_ok());
        assert!(input(366).validate().is_ok());
        assert!(input(0).validate().is_err());
        assert!(input(-7).validate().is_err());
        assert!(input(i64::from(i32::MAX)).validate().is_err());
    }

    #[test]
    fn test_campaign_input_maps_target_date() {
        let input = CampaignInput {
            farm_id: Uuid::new_v4(),
            selling_schedule_id: Uuid::new_v4(),
            target_date: date(2024, 6, 1),
            frequency_days: 14,
        };
        let request = CampaignRequest::from(input.clone());
        assert_eq!(request.start_date, input.target_date);
        assert_eq!(request.frequency_days, 14);
    }
}
