//! Planting recommendation and scheduling engine
//!
//! Pure functions over a [`FarmSnapshot`](crate::models::FarmSnapshot):
//! - [`conflict`]: interval overlap against active occupancies
//! - [`availability`]: free locations now or for a future window
//! - [`selling_dates`]: recurring cadence expanded to concrete dates
//! - [`valuator`]: weighted multi-factor scoring of one candidate
//! - [`engine`]: current-opportunity and campaign recommendations
//! - [`harvests`]: upcoming harvest listing for the dashboard

pub mod availability;
pub mod conflict;
pub mod engine;
pub mod harvests;
pub mod selling_dates;
pub mod valuator;

use thiserror::Error;
use uuid::Uuid;

pub use availability::{find_available_for_window, find_available_now};
pub use conflict::conflicts;
pub use engine::{campaign_priority, recommend_campaign, recommend_now, CampaignRequest};
pub use harvests::{next_selling_date, upcoming_harvests};
pub use selling_dates::{generate_dates, upcoming_sale_dates, DEFAULT_HORIZON_DAYS};
pub use valuator::{score, Candidate, Valuation};

/// Recoverable conditions reported to the caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Selling schedule {0} not found")]
    ScheduleNotFound(Uuid),

    #[error("Selling frequency must be a positive number of days, got {0}")]
    InvalidCadence(i64),
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
