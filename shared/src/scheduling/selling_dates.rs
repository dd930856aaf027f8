//! Expansion of a selling cadence into concrete sale dates

use chrono::{Days, NaiveDate};

use super::{SchedulingError, SchedulingResult};
use crate::models::SellingCadence;

/// Full campaign horizon: twelve 30-day months
pub const DEFAULT_HORIZON_DAYS: i64 = 360;

/// `start, start + f, start + 2f, …` up to and including `start + horizon_days`.
///
/// Dates past the last representable calendar day are never produced, so a
/// very large frequency or horizon just shortens the list.
pub fn generate_dates(
    start: NaiveDate,
    frequency_days: i64,
    horizon_days: i64,
) -> SchedulingResult<Vec<NaiveDate>> {
    if frequency_days <= 0 {
        return Err(SchedulingError::InvalidCadence(frequency_days));
    }
    if horizon_days < 0 {
        return Ok(Vec::new());
    }

    let end = start
        .checked_add_days(Days::new(horizon_days.unsigned_abs()))
        .unwrap_or(NaiveDate::MAX);
    let step = Days::new(frequency_days.unsigned_abs());
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.checked_add_days(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(dates)
}

/// The next `limit` sale dates on or after `from` across all active
/// cadences, merged in date order. Cadences with a non-positive frequency
/// are skipped.
pub fn upcoming_sale_dates(
    cadences: &[SellingCadence],
    from: NaiveDate,
    horizon_days: i64,
    limit: usize,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for cadence in cadences.iter().filter(|c| c.is_active) {
        if cadence.frequency_days <= 0 {
            tracing::warn!(
                cadence_id = %cadence.id,
                frequency_days = cadence.frequency_days,
                "Skipping selling cadence with non-positive frequency"
            );
            continue;
        }
        let Some(first) =
            first_on_or_after(cadence.first_selling_date, cadence.frequency_days, from)
        else {
            continue;
        };
        let remaining = horizon_days - (first - from).num_days();
        if remaining < 0 {
            continue;
        }
        if let Ok(generated) = generate_dates(first, cadence.frequency_days, remaining) {
            dates.extend(generated);
        }
    }
    dates.sort();
    dates.dedup();
    dates.truncate(limit);
    dates
}

/// First occurrence of a cadence that falls on or after `from`, if it is
/// still a representable date
fn first_on_or_after(start: NaiveDate, frequency_days: i64, from: NaiveDate) -> Option<NaiveDate> {
    if start >= from {
        return Some(start);
    }
    let behind = (from - start).num_days();
    let mut steps = behind / frequency_days;
    if behind % frequency_days != 0 {
        steps += 1;
    }
    let offset = steps.checked_mul(frequency_days)?;
    start.checked_add_days(Days::new(offset.unsigned_abs()))
}
