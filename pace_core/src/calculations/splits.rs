//! # Race Splits
//!
//! Cumulative times at fixed milestones for an even-paced race.

use serde::{Deserialize, Serialize};

use crate::errors::{
    ensure_finite_result, ensure_non_negative, ensure_positive, CalcError, CalcResult,
};
use crate::time_format::format_duration;

/// Milestones (km) reported when they fall within the race distance.
pub const MILESTONES_KM: [f64; 11] = [
    1.0, 5.0, 10.0, 15.0, 20.0, 21.0975, 25.0, 30.0, 35.0, 40.0, 42.195,
];

/// Input parameters for a splits table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitsInput {
    /// Target pace, whole minutes per km
    pub pace_minutes: f64,

    /// Target pace, remaining seconds per km
    #[serde(default)]
    pub pace_seconds: f64,

    /// Race distance in km
    pub distance_km: f64,
}

impl SplitsInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("pace_minutes", self.pace_minutes)?;
        ensure_non_negative("pace_seconds", self.pace_seconds)?;
        if self.pace_s_per_km() <= 0.0 {
            return Err(CalcError::invalid_input(
                "pace",
                "0:00",
                "Pace must be greater than zero",
            ));
        }
        ensure_positive("distance_km", self.distance_km)?;
        Ok(())
    }

    /// Target pace in seconds per km
    pub fn pace_s_per_km(&self) -> f64 {
        self.pace_minutes * 60.0 + self.pace_seconds
    }
}

/// Cumulative time at one milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub distance_km: f64,
    pub seconds: f64,
    /// `H:MM:SS` or `M:SS`
    pub time: String,
}

/// Results from a splits calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitsResult {
    pub pace_s_per_km: f64,
    pub splits: Vec<Split>,
    pub total_seconds: f64,
    pub total_time: String,
}

/// Calculate even-pace splits.
pub fn calculate(input: &SplitsInput) -> CalcResult<SplitsResult> {
    input.validate()?;

    let pace = ensure_finite_result("splits", "pace", input.pace_s_per_km())?;
    // Every milestone lies within the distance, so a finite total bounds them all.
    let total_seconds = ensure_finite_result("splits", "total time", input.distance_km * pace)?;
    let splits = MILESTONES_KM
        .iter()
        .filter(|&&km| km <= input.distance_km)
        .map(|&km| {
            let seconds = km * pace;
            Split {
                distance_km: km,
                seconds,
                time: format_duration(seconds),
            }
        })
        .collect();

    Ok(SplitsResult {
        pace_s_per_km: pace,
        splits,
        total_seconds,
        total_time: format_duration(total_seconds),
    })
}
