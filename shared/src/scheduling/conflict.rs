//! Interval conflict checks for a single location

use crate::models::Occupancy;
use crate::types::DateWindow;

/// Whether any active occupancy of a location overlaps `window`.
///
/// Overlap is closed-inclusive: `start <= window.end && end >= window.start`.
pub fn conflicts<'a, I>(occupancies: I, window: &DateWindow) -> bool
where
    I: IntoIterator<Item = &'a Occupancy>,
{
    occupancies.into_iter().any(|o| o.blocks(window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn occupancy(start: NaiveDate, end: Option<NaiveDate>, active: bool) -> Occupancy {
        Occupancy {
            id: Uuid::new_v4(),
            location_id: Uuid::new_v4(),
            crop_id: Uuid::new_v4(),
            planted_date: start,
            expected_harvest_date: end,
            actual_harvest_date: None,
            is_active: active,
        }
    }

    #[test]
    fn test_overlapping_window_conflicts() {
        let occ = occupancy(date(2024, 3, 1), Some(date(2024, 4, 30)), true);
        let window = DateWindow::new(date(2024, 4, 15), date(2024, 6, 1));
        assert!(conflicts([&occ], &window));
    }

    #[test]
    fn test_shared_endpoint_counts_as_overlap() {
        let occ = occupancy(date(2024, 3, 1), Some(date(2024, 4, 30)), true);
        assert!(conflicts([&occ], &DateWindow::new(date(2024, 4, 30), date(2024, 5, 30))));
        assert!(conflicts([&occ], &DateWindow::new(date(2024, 2, 1), date(2024, 3, 1))));
    }

    #[test]
    fn test_adjacent_window_does_not_conflict() {
        let occ = occupancy(date(2024, 3, 1), Some(date(2024, 4, 30)), true);
        assert!(!conflicts([&occ], &DateWindow::new(date(2024, 5, 1), date(2024, 6, 1))));
        assert!(!conflicts([&occ], &DateWindow::new(date(2024, 1, 1), date(2024, 2, 29))));
    }

    #[test]
    fn test_inactive_occupancy_never_conflicts() {
        let occ = occupancy(date(2024, 3, 1), Some(date(2024, 4, 30)), false);
        assert!(!conflicts([&occ], &DateWindow::day(date(2024, 3, 15))));
    }

    #[test]
    fn test_actual_harvest_replaces_expected_end() {
        let mut occ = occupancy(date(2024, 3, 1), Some(date(2024, 4, 30)), true);
        occ.actual_harvest_date = Some(date(2024, 4, 10));
        assert!(!conflicts([&occ], &DateWindow::day(date(2024, 4, 20))));
        assert!(conflicts([&occ], &DateWindow::day(date(2024, 4, 10))));
    }

    #[test]
    fn test_open_ended_occupancy_blocks_later_windows() {
        let occ = occupancy(date(2024, 3, 1), None, true);
        assert!(conflicts([&occ], &DateWindow::day(date(2030, 1, 1))));
        assert!(!conflicts([&occ], &DateWindow::new(date(2024, 1, 1), date(2024, 2, 28))));
    }

    #[test]
    fn test_no_occupancies_no_conflict() {
        let none: Vec<Occupancy> = Vec::new();
        assert!(!conflicts(&none, &DateWindow::day(date(2024, 1, 1))));
    }
}
