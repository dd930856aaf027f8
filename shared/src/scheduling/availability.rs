//! Free-location lookup
//!
//! Callers pass only active locations in active beds and farms. Output
//! order follows input order.

use std::collections::HashMap;

use uuid::Uuid;

use super::conflict::conflicts;
use crate::models::{Location, Occupancy};
use crate::types::DateWindow;

/// Locations with nothing currently growing: no active occupancy without a
/// recorded actual harvest.
pub fn find_available_now<'a>(
    locations: &'a [Location],
    occupancies_by_location: &HashMap<Uuid, Vec<&Occupancy>>,
) -> Vec<&'a Location> {
    locations
        .iter()
        .filter(|location| {
            occupancies_by_location
                .get(&location.id)
                .map(|occupancies| !occupancies.iter().any(|o| o.is_growing()))
                .unwrap_or(true)
        })
        .collect()
}

/// Locations with no active occupancy overlapping `window`
pub fn find_available_for_window<'a>(
    locations: &'a [Location],
    occupancies_by_location: &HashMap<Uuid, Vec<&Occupancy>>,
    window: &DateWindow,
) -> Vec<&'a Location> {
    locations
        .iter()
        .filter(|location| {
            occupancies_by_location
                .get(&location.id)
                .map(|occupancies| !conflicts(occupancies.iter().copied(), window))
                .unwrap_or(true)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line(name: &str) -> Location {
        Location::new(Uuid::new_v4(), name, Uuid::new_v4(), "Bed A", Uuid::new_v4())
    }

    fn planted(location: &Location, start: NaiveDate, end: NaiveDate) -> Occupancy {
        Occupancy {
            id: Uuid::new_v4(),
            location_id: location.id,
            crop_id: Uuid::new_v4(),
            planted_date: start,
            expected_harvest_date: Some(end),
            actual_harvest_date: None,
            is_active: true,
        }
    }

    fn index(occupancies: &[Occupancy]) -> HashMap<Uuid, Vec<&Occupancy>> {
        let mut map: HashMap<Uuid, Vec<&Occupancy>> = HashMap::new();
        for o in occupancies {
            map.entry(o.location_id).or_default().push(o);
        }
        map
    }

    #[test]
    fn test_now_excludes_growing_locations_and_keeps_order() {
        let locations = vec![line("L1"), line("L2"), line("L3")];
        let occupancies = vec![planted(&locations[1], date(2024, 3, 1), date(2024, 5, 1))];
        let available = find_available_now(&locations, &index(&occupancies));
        let names: Vec<&str> = available.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["L1", "L3"]);
    }

    #[test]
    fn test_now_ignores_harvested_occupancies() {
        let locations = vec![line("L1")];
        let mut occ = planted(&locations[0], date(2024, 3, 1), date(2024, 5, 1));
        occ.actual_harvest_date = Some(date(2024, 4, 28));
        let occupancies = vec![occ];
        assert_eq!(find_available_now(&locations, &index(&occupancies)).len(), 1);
    }

    #[test]
    fn test_window_mode_checks_overlap() {
        let locations = vec![line("L1"), line("L2")];
        let occupancies = vec![planted(&locations[0], date(2024, 3, 1), date(2024, 5, 1))];
        let idx = index(&occupancies);

        let clash = DateWindow::new(date(2024, 4, 1), date(2024, 6, 1));
        let available = find_available_for_window(&locations, &idx, &clash);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name, "L2");

        let later = DateWindow::new(date(2024, 5, 2), date(2024, 7, 1));
        assert_eq!(find_available_for_window(&locations, &idx, &later).len(), 2);
    }
}
