//! Recommendation engine
//!
//! Two modes share the same snapshot:
//! - current opportunities: best crop per free location, planted today
//! - future campaign: back-calculated plantings for each generated sale date

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::availability::{find_available_for_window, find_available_now};
use super::selling_dates::{generate_dates, upcoming_sale_dates, DEFAULT_HORIZON_DAYS};
use super::valuator::{score, Candidate, Valuation};
use super::{SchedulingError, SchedulingResult};
use crate::models::{CropProfile, FarmSnapshot, Location, Suggestion};
use crate::types::{DateWindow, Priority, Season};

/// Sale dates fed to the valuator in current-opportunities mode
const UPCOMING_SALES_FOR_TIMING: usize = 3;

const PRICE_WEIGHT: f64 = 0.3;
const YIELD_WEIGHT: f64 = 0.2;
const SEASONAL_MATCH_BONUS: f64 = 0.5;
const STORAGE_WEIGHT: f64 = 0.1;
const STORAGE_REFERENCE_DAYS: f64 = 30.0;

/// A campaign run bound to one selling schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignRequest {
    pub farm_id: Uuid,
    pub selling_schedule_id: Uuid,
    pub start_date: NaiveDate,
    pub frequency_days: i64,
}

/// Best crop for every location that is free today.
///
/// Ties keep the first crop in snapshot order. Results put high priority
/// first, then higher market demand; the sort is stable.
pub fn recommend_now(snapshot: &FarmSnapshot, today: NaiveDate) -> Vec<Suggestion> {
    let index = snapshot.occupancies_by_location();
    let sale_dates = upcoming_sale_dates(
        &snapshot.cadences,
        today,
        DEFAULT_HORIZON_DAYS,
        UPCOMING_SALES_FOR_TIMING,
    );
    let season = Season::of(today);
    let available = find_available_now(&snapshot.locations, &index);

    tracing::debug!(
        available_locations = available.len(),
        crops = snapshot.crops.len(),
        sale_dates = sale_dates.len(),
        "Evaluating current planting opportunities"
    );

    let mut suggestions = Vec::new();
    for location in available {
        let mut best: Option<(&CropProfile, NaiveDate, Valuation)> = None;
        for crop in snapshot.crops.iter().filter(|c| c.is_active) {
            let cycle = snapshot.signals.growth_cycle_for(crop);
            let Some(harvest) = today.checked_add_days(Days::new(u64::from(cycle))) else {
                tracing::trace!(crop = %crop.name, cycle, "Harvest date out of calendar range");
                continue;
            };
            let valuation = score(&Candidate {
                crop,
                location,
                target_harvest_date: harvest,
                season,
                upcoming_sale_dates: &sale_dates,
                yield_history: &snapshot.yield_history,
                active_count_for_crop: snapshot.active_count(crop.id),
                signals: &snapshot.signals,
            });
            let better = best
                .as_ref()
                .map_or(true, |(_, _, current)| valuation.score > current.score);
            if better {
                best = Some((crop, harvest, valuation));
            }
        }

        if let Some((crop, harvest, valuation)) = best {
            if valuation.score > 0.0 {
                suggestions.push(Suggestion {
                    location_id: location.id,
                    location_name: location.name.clone(),
                    bed_name: location.bed_name.clone(),
                    crop_id: crop.id,
                    crop_name: crop.name.clone(),
                    planting_date: today,
                    expected_harvest_date: harvest,
                    score: valuation.score,
                    priority: valuation.priority(),
                    market_demand: valuation.market_demand,
                    suggested_quantity: crop.plants_for_area(location.area_sqm),
                    reason: valuation.rationale(),
                });
            }
        }
    }

    rank_current(&mut suggestions);
    suggestions
}

/// High priority first, then market demand descending. Stable, so equal
/// keys keep location order.
fn rank_current(suggestions: &mut [Suggestion]) {
    suggestions.sort_by(|a, b| {
        let a_high = a.priority == Priority::High;
        let b_high = b.priority == Priority::High;
        b_high
            .cmp(&a_high)
            .then_with(|| b.market_demand.total_cmp(&a.market_demand))
    });
}

/// Plantings whose harvest lands on each sale date of the campaign.
///
/// Fails with `ScheduleNotFound` when the schedule is missing or belongs to
/// another farm, and with `InvalidCadence` for a non-positive frequency.
/// Each sale date's batch is ordered by priority before being appended.
pub fn recommend_campaign(
    snapshot: &FarmSnapshot,
    request: &CampaignRequest,
    today: NaiveDate,
) -> SchedulingResult<Vec<Suggestion>> {
    snapshot
        .cadence(request.selling_schedule_id)
        .filter(|c| c.farm_id == request.farm_id)
        .ok_or(SchedulingError::ScheduleNotFound(request.selling_schedule_id))?;

    let sale_dates = generate_dates(
        request.start_date,
        request.frequency_days,
        DEFAULT_HORIZON_DAYS,
    )?;
    let index = snapshot.occupancies_by_location();

    tracing::debug!(
        schedule_id = %request.selling_schedule_id,
        sale_dates = sale_dates.len(),
        crops = snapshot.crops.len(),
        locations = snapshot.locations.len(),
        "Generating campaign suggestions"
    );

    let mut suggestions = Vec::new();
    for sale_date in sale_dates {
        let mut batch = Vec::new();
        for crop in snapshot.crops.iter().filter(|c| c.is_active) {
            let cycle = snapshot.signals.growth_cycle_for(crop);
            let Some(window) = DateWindow::ending_on(sale_date, cycle) else {
                tracing::trace!(crop = %crop.name, cycle, "Planting date out of calendar range");
                continue;
            };
            let planting_date = window.start;

            if planting_date <= today {
                tracing::trace!(crop = %crop.name, %sale_date, "Planting date already passed");
                continue;
            }
            if !crop.suits_date(planting_date) {
                tracing::trace!(crop = %crop.name, %planting_date, "Out of planting season");
                continue;
            }

            let available = find_available_for_window(&snapshot.locations, &index, &window);
            if let Some(location) = available.first() {
                batch.push(campaign_suggestion(snapshot, crop, location, window));
            }
        }
        batch.sort_by(|a, b| b.score.total_cmp(&a.score));
        suggestions.extend(batch);
    }

    tracing::debug!(suggestions = suggestions.len(), "Campaign suggestions generated");
    Ok(suggestions)
}

/// Simplified campaign priority: price, expected yield, season at the sale
/// date and storage life.
pub fn campaign_priority(crop: &CropProfile, sale_date: NaiveDate) -> f64 {
    let mut priority = 0.0;

    if let Some(price) = crop.market_price_per_kg.and_then(|p| p.to_f64()) {
        priority += price * PRICE_WEIGHT;
    }
    if let Some(yield_per_sqm) = crop.expected_yield_per_sqm.and_then(|y| y.to_f64()) {
        priority += yield_per_sqm * YIELD_WEIGHT;
    }
    if in_season_at(crop, sale_date) {
        priority += SEASONAL_MATCH_BONUS;
    }
    if let Some(storage) = crop.storage_life_days {
        priority += (f64::from(storage) / STORAGE_REFERENCE_DAYS).min(1.0) * STORAGE_WEIGHT;
    }

    priority
}

fn in_season_at(crop: &CropProfile, date: NaiveDate) -> bool {
    !crop.preferred_months.is_empty() && crop.preferred_months.contains(&date.month())
}

fn campaign_suggestion(
    snapshot: &FarmSnapshot,
    crop: &CropProfile,
    location: &Location,
    window: DateWindow,
) -> Suggestion {
    let sale_date = window.end;
    let priority = campaign_priority(crop, sale_date);

    let mut reasons = vec![format!("Ready for sale on {}", sale_date)];
    if in_season_at(crop, sale_date) {
        reasons.push("In season at sale date".to_string());
    }

    Suggestion {
        location_id: location.id,
        location_name: location.name.clone(),
        bed_name: location.bed_name.clone(),
        crop_id: crop.id,
        crop_name: crop.name.clone(),
        planting_date: window.start,
        expected_harvest_date: sale_date,
        score: priority,
        priority: Priority::from_score(priority),
        market_demand: snapshot.signals.demand_for(crop),
        suggested_quantity: crop.plants_for_area(location.area_sqm),
        reason: reasons.join("; "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SellingCadence;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_campaign_priority_components() {
        let mut crop = CropProfile::new(Uuid::new_v4(), "Tomato", 70);
        crop.market_price_per_kg = Some(Decimal::from(2));
        crop.expected_yield_per_sqm = Some(Decimal::from(3));
        crop.preferred_months = vec![6, 7];
        crop.storage_life_days = Some(15);

        // 0.6 + 0.6 + 0.5 + 0.05
        let in_season = campaign_priority(&crop, date(2024, 7, 10));
        assert!((in_season - 1.75).abs() < 1e-9);

        let off_season = campaign_priority(&crop, date(2024, 9, 10));
        assert!((off_season - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_campaign_priority_caps_storage_bonus() {
        let mut crop = CropProfile::new(Uuid::new_v4(), "Squash", 90);
        crop.storage_life_days = Some(120);
        assert!((campaign_priority(&crop, date(2024, 7, 10)) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_no_preferred_months_gets_no_seasonal_bonus() {
        let crop = CropProfile::new(Uuid::new_v4(), "Radish", 25);
        assert_eq!(campaign_priority(&crop, date(2024, 7, 10)), 0.0);
    }

    fn farm_with(crops: Vec<CropProfile>) -> (FarmSnapshot, Uuid, Uuid) {
        let farm_id = Uuid::new_v4();
        let cadence = SellingCadence {
            id: Uuid::new_v4(),
            farm_id,
            name: "Market".to_string(),
            first_selling_date: date(2024, 3, 2),
            frequency_days: 7,
            is_active: true,
        };
        let cadence_id = cadence.id;
        let snapshot = FarmSnapshot {
            locations: vec![Location::new(Uuid::new_v4(), "L1", Uuid::new_v4(), "B1", farm_id)],
            crops,
            cadences: vec![cadence],
            ..Default::default()
        };
        (snapshot, farm_id, cadence_id)
    }

    #[test]
    fn test_recommend_now_skips_unrepresentable_harvest() {
        let endless = CropProfile::new(Uuid::new_v4(), "Endless", i32::MAX as u32);
        let mut kale = CropProfile::new(Uuid::new_v4(), "Kale", 50);
        kale.market_demand = Some(0.2);
        let (snapshot, _, _) = farm_with(vec![endless, kale]);

        let suggestions = recommend_now(&snapshot, date(2024, 3, 1));
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].crop_name, "Kale");
    }

    #[test]
    fn test_campaign_with_largest_frequency() {
        let (snapshot, farm_id, cadence_id) =
            farm_with(vec![CropProfile::new(Uuid::new_v4(), "Kale", 50)]);
        let request = CampaignRequest {
            farm_id,
            selling_schedule_id: cadence_id,
            start_date: date(2024, 6, 1),
            frequency_days: i64::from(i32::MAX),
        };

        let suggestions = recommend_campaign(&snapshot, &request, date(2024, 3, 1)).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].expected_harvest_date, date(2024, 6, 1));
    }

    #[test]
    fn test_campaign_skips_unrepresentable_planting_date() {
        let (snapshot, farm_id, cadence_id) = farm_with(vec![CropProfile::new(
            Uuid::new_v4(),
            "Endless",
            u32::MAX,
        )]);
        let request = CampaignRequest {
            farm_id,
            selling_schedule_id: cadence_id,
            start_date: date(2024, 6, 1),
            frequency_days: 30,
        };

        assert_eq!(recommend_campaign(&snapshot, &request, date(2024, 3, 1)), Ok(vec![]));
    }

    fn ranked(name: &str, score: f64, market_demand: f64) -> Suggestion {
        Suggestion {
            location_id: Uuid::new_v4(),
            location_name: name.to_string(),
            bed_name: "B1".to_string(),
            crop_id: Uuid::new_v4(),
            crop_name: name.to_string(),
            planting_date: date(2024, 3, 1),
            expected_harvest_date: date(2024, 4, 20),
            score,
            priority: Priority::from_score(score),
            market_demand,
            suggested_quantity: 1,
            reason: String::new(),
        }
    }

    #[test]
    fn test_current_ranking_puts_high_priority_first() {
        let mut suggestions = vec![
            ranked("medium-popular", 0.7, 0.95),
            ranked("high-modest", 0.85, 0.4),
        ];
        rank_current(&mut suggestions);

        let names: Vec<&str> = suggestions.iter().map(|s| s.location_name.as_str()).collect();
        assert_eq!(names, vec!["high-modest", "medium-popular"]);
    }

    #[test]
    fn test_current_ranking_orders_bucket_by_demand_then_input() {
        let mut suggestions = vec![
            ranked("low-a", 0.3, 0.5),
            ranked("medium", 0.65, 0.6),
            ranked("low-b", 0.4, 0.5),
            ranked("high-a", 0.9, 0.7),
            ranked("high-b", 0.82, 0.9),
        ];
        rank_current(&mut suggestions);

        let names: Vec<&str> = suggestions.iter().map(|s| s.location_name.as_str()).collect();
        // medium and low share a bucket below high, ordered by demand alone
        assert_eq!(names, vec!["high-b", "high-a", "medium", "low-a", "low-b"]);
    }
}
