//! Candidate valuation
//!
//! Scores one (location, crop, target harvest date) triple:
//!
//! | Signal            | Contribution                           |
//! |-------------------|----------------------------------------|
//! | Market demand     | demand × 0.4                           |
//! | Seasonal fit      | (1.0 or 0.5) × 0.3                     |
//! | Sale-date timing  | (1.0, 0.8 or 0) × 0.3                  |
//! | Historical yield  | + min(avg / 100, 0.2)                  |
//! | Diversity         | + 0.1 when fewer than 3 active plantings |
//!
//! The total is unclamped, so it can exceed 1.0.

use chrono::NaiveDate;

use crate::models::{CropProfile, Location, SignalTables, YieldHistory};
use crate::types::{Priority, Season};

pub const DEMAND_WEIGHT: f64 = 0.4;
pub const SEASONAL_WEIGHT: f64 = 0.3;
pub const TIMING_WEIGHT: f64 = 0.3;
pub const MAX_YIELD_BONUS: f64 = 0.2;
pub const DIVERSITY_BONUS: f64 = 0.1;

/// Active plantings of a crop below which diversity is rewarded
const DIVERSITY_LIMIT: usize = 3;
/// Upcoming sale dates compared against the harvest date
const SALE_DATES_CONSIDERED: usize = 3;

const IN_SEASON_FIT: f64 = 1.0;
const OUT_OF_SEASON_FIT: f64 = 0.5;

const PERFECT_TIMING: &str = "Perfect timing for market";
const GOOD_TIMING: &str = "Good timing for market";
const BALANCED: &str = "Balanced recommendation";

/// Inputs for one valuation
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub crop: &'a CropProfile,
    pub location: &'a Location,
    pub target_harvest_date: NaiveDate,
    pub season: Season,
    pub upcoming_sale_dates: &'a [NaiveDate],
    pub yield_history: &'a YieldHistory,
    pub active_count_for_crop: usize,
    pub signals: &'a SignalTables,
}

/// Composite score with the phrases that explain it
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub score: f64,
    pub market_demand: f64,
    pub reasons: Vec<String>,
}

impl Valuation {
    /// Semicolon-joined reasons, or a neutral phrase when none triggered
    pub fn rationale(&self) -> String {
        if self.reasons.is_empty() {
            BALANCED.to_string()
        } else {
            self.reasons.join("; ")
        }
    }

    pub fn priority(&self) -> Priority {
        Priority::from_score(self.score)
    }
}

/// Score a candidate. Pure: identical inputs give identical output.
pub fn score(candidate: &Candidate<'_>) -> Valuation {
    let mut reasons = Vec::new();

    let demand = candidate.signals.demand_for(candidate.crop);
    if demand > 0.7 {
        reasons.push("High market demand".to_string());
    }

    let seasonal = if candidate.signals.is_seasonal(candidate.season, candidate.crop) {
        IN_SEASON_FIT
    } else {
        OUT_OF_SEASON_FIT
    };
    if seasonal > 0.8 {
        reasons.push(format!("Ideal for {} season", candidate.season));
    }

    let timing = timing_score(
        candidate.target_harvest_date,
        candidate.upcoming_sale_dates,
        &mut reasons,
    );

    let yield_bonus = candidate
        .yield_history
        .average_for(candidate.crop.id)
        .map(|avg| (avg / 100.0).clamp(0.0, MAX_YIELD_BONUS))
        .unwrap_or(0.0);
    if yield_bonus > 0.1 {
        reasons.push("Historically good yields".to_string());
    }

    let diversity_bonus = if candidate.active_count_for_crop < DIVERSITY_LIMIT {
        if reasons.is_empty() {
            reasons.push("Good crop diversity".to_string());
        }
        DIVERSITY_BONUS
    } else {
        0.0
    };

    let score = demand * DEMAND_WEIGHT
        + seasonal * SEASONAL_WEIGHT
        + timing * TIMING_WEIGHT
        + yield_bonus
        + diversity_bonus;

    Valuation {
        score,
        market_demand: demand,
        reasons,
    }
}

/// Best alignment between the harvest date and the next few sale dates
fn timing_score(harvest: NaiveDate, sale_dates: &[NaiveDate], reasons: &mut Vec<String>) -> f64 {
    let mut best: f64 = 0.0;
    for sale in sale_dates.iter().take(SALE_DATES_CONSIDERED) {
        let gap = (harvest - *sale).num_days().abs();
        if gap <= 7 {
            best = best.max(1.0);
            if !has(reasons, PERFECT_TIMING) {
                reasons.push(PERFECT_TIMING.to_string());
            }
        } else if gap <= 14 {
            best = best.max(0.8);
            if !has(reasons, PERFECT_TIMING) && !has(reasons, GOOD_TIMING) {
                reasons.push(GOOD_TIMING.to_string());
            }
        }
    }
    best
}

fn has(reasons: &[String], phrase: &str) -> bool {
    reasons.iter().any(|r| r == phrase)
}
