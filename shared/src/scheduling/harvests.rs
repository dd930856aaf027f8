//! Dashboard helpers built on the same snapshot

use chrono::{Days, NaiveDate};

use super::selling_dates::{upcoming_sale_dates, DEFAULT_HORIZON_DAYS};
use crate::models::{FarmSnapshot, SellingCadence, UpcomingHarvest};
use crate::types::DateWindow;

/// Growing plantings expected to be harvested within `weeks_ahead` weeks,
/// soonest first
pub fn upcoming_harvests(
    snapshot: &FarmSnapshot,
    today: NaiveDate,
    weeks_ahead: u32,
) -> Vec<UpcomingHarvest> {
    let until = today
        .checked_add_days(Days::new(u64::from(weeks_ahead) * 7))
        .unwrap_or(NaiveDate::MAX);
    let lookahead = DateWindow::new(today, until);

    let mut upcoming: Vec<UpcomingHarvest> = snapshot
        .occupancies
        .iter()
        .filter(|o| o.is_growing())
        .filter_map(|o| {
            let expected = o.expected_harvest_date?;
            if !lookahead.contains(expected) {
                return None;
            }
            let crop = snapshot.crop(o.crop_id)?;
            let location = snapshot.location(o.location_id)?;
            Some(UpcomingHarvest {
                occupancy_id: o.id,
                crop_name: crop.name.clone(),
                location_id: location.id,
                location_name: location.name.clone(),
                bed_name: location.bed_name.clone(),
                expected_harvest_date: expected,
                days_until_harvest: (expected - today).num_days(),
            })
        })
        .collect();

    upcoming.sort_by_key(|h| h.expected_harvest_date);
    upcoming
}

/// Earliest sale date on or after `today` across active cadences
pub fn next_selling_date(cadences: &[SellingCadence], today: NaiveDate) -> Option<NaiveDate> {
    upcoming_sale_dates(cadences, today, DEFAULT_HORIZON_DAYS, 1)
        .into_iter()
        .next()
}
