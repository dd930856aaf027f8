//! Validation utilities for planner records

use rust_decimal::Decimal;

use crate::models::CropProfile;

// ============================================================================
// Schedule Validations
// ============================================================================

/// Selling frequency must be a positive number of days
pub fn validate_cadence_frequency(frequency_days: i64) -> Result<(), &'static str> {
    if frequency_days <= 0 {
        return Err("Selling frequency must be at least 1 day");
    }
    Ok(())
}

// ============================================================================
// Crop Validations
// ============================================================================

/// Market demand score is a fraction between 0 and 1
pub fn validate_demand_score(demand: f64) -> Result<(), &'static str> {
    if !(0.0..=1.0).contains(&demand) {
        return Err("Market demand must be between 0.0 and 1.0");
    }
    Ok(())
}

/// Calendar month numbers 1-12
pub fn validate_months(months: &[u32]) -> Result<(), &'static str> {
    if months.iter().any(|m| !(1..=12).contains(m)) {
        return Err("Preferred months must be between 1 and 12");
    }
    Ok(())
}

pub fn validate_crop_profile(crop: &CropProfile) -> Result<(), &'static str> {
    if crop.name.trim().is_empty() {
        return Err("Crop name is required");
    }
    if crop.growth_cycle_days == 0 {
        return Err("Growth cycle must be at least 1 day");
    }
    validate_months(&crop.preferred_months)?;
    if let Some(demand) = crop.market_demand {
        validate_demand_score(demand)?;
    }
    for spacing in [crop.spacing_cm, crop.row_spacing_cm].into_iter().flatten() {
        if spacing <= Decimal::ZERO {
            return Err("Plant spacing must be positive");
        }
    }
    if let Some(price) = crop.market_price_per_kg {
        if price < Decimal::ZERO {
            return Err("Market price cannot be negative");
        }
    }
    Ok(())
}

// ============================================================================
// Layout Validations
// ============================================================================

/// Line length and width in metres, both positive when present
pub fn validate_line_dimensions(
    length_m: Option<Decimal>,
    width_m: Option<Decimal>,
) -> Result<(), &'static str> {
    for side in [length_m, width_m].into_iter().flatten() {
        if side <= Decimal::ZERO {
            return Err("Line dimensions must be positive");
        }
    }
    Ok(())
}
