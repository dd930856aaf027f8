//! Common types used across the planner

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Closed date interval `[start, end]`, both days included
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Single-day window, used for "is this free right now" checks
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Window covering a growth cycle that ends on `harvest`, or `None`
    /// when the cycle would start before the first representable date
    pub fn ending_on(harvest: NaiveDate, cycle_days: u32) -> Option<Self> {
        let start = harvest.checked_sub_days(Days::new(u64::from(cycle_days)))?;
        Some(Self {
            start,
            end: harvest,
        })
    }

    /// Inclusive overlap: sharing a single endpoint day counts
    pub fn overlaps(&self, other: &DateWindow) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Growing season derived from the calendar month (northern hemisphere)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Mar–May spring, Jun–Aug summer, Sep–Nov fall, Dec–Feb winter
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Priority bucket shown next to a suggestion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Lower bounds are inclusive: 0.8 is high, 0.6 is medium
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Priority::High
        } else if score >= 0.6 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_ending_on_harvest() {
        let window = DateWindow::ending_on(date(2024, 5, 16), 45).unwrap();
        assert_eq!(window.start, date(2024, 4, 1));
        assert_eq!(window.end, date(2024, 5, 16));
    }

    #[test]
    fn test_window_before_first_calendar_day() {
        assert_eq!(DateWindow::ending_on(date(2024, 5, 16), u32::MAX), None);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 15));
        assert!(window.contains(date(2024, 3, 1)));
        assert!(window.contains(date(2024, 3, 15)));
        assert!(!window.contains(date(2024, 3, 16)));
    }
}
