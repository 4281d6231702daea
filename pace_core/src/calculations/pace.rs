//! # Pace / Speed Calculation
//!
//! Converts a distance and elapsed time into pace (per km or per mile) and
//! speed. The active distance unit is part of the input; the result also
//! carries the pace in the other unit.
//!
//! ## Example
//!
//! ```rust
//! use pace_core::calculations::pace::{calculate, PaceInput};
//! use pace_core::units::DistanceUnit;
//!
//! let input = PaceInput {
//!     distance: 10.0,
//!     hours: None,
//!     minutes: Some(50.0),
//!     seconds: None,
//!     unit: DistanceUnit::Km,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.pace, "5:00");
//! assert_eq!(result.other_pace, "8:03");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::elapsed_seconds;
use crate::errors::{ensure_finite_result, ensure_positive, CalcError, CalcResult};
use crate::time_format::format_pace;
use crate::units::{DistanceUnit, MPH_PER_KMH};

/// Input parameters for a pace calculation.
///
/// Missing time components count as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceInput {
    /// Distance covered, in `unit`
    pub distance: f64,

    #[serde(default)]
    pub hours: Option<f64>,

    #[serde(default)]
    pub minutes: Option<f64>,

    #[serde(default)]
    pub seconds: Option<f64>,

    /// Unit of `distance` and of the primary pace
    #[serde(default)]
    pub unit: DistanceUnit,
}

impl PaceInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("distance", self.distance)?;
        let total = self.total_seconds()?;
        if total <= 0.0 {
            return Err(CalcError::division_by_zero("time"));
        }
        Ok(())
    }

    /// Elapsed time in seconds
    pub fn total_seconds(&self) -> CalcResult<f64> {
        elapsed_seconds(self.hours, self.minutes, self.seconds)
    }
}

/// Results from a pace calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceResult {
    /// Unit the primary pace is expressed in
    pub unit: DistanceUnit,

    /// Elapsed time in seconds
    pub total_seconds: f64,

    /// Seconds per `unit`
    pub pace_seconds: f64,

    /// Formatted `M:SS` pace per `unit`
    pub pace: String,

    /// The opposite unit of the toggle
    pub other_unit: DistanceUnit,

    /// Seconds per `other_unit`
    pub other_pace_seconds: f64,

    /// Formatted `M:SS` pace per `other_unit`
    pub other_pace: String,

    /// Speed in km/h
    pub speed_kmh: f64,

    /// Speed in mph
    pub speed_mph: f64,
}

/// Calculate pace and speed.
///
/// # Returns
///
/// * `Ok(PaceResult)` - Pace in both units and speed
/// * `Err(CalcError::DivisionByZero)` - Zero distance or zero elapsed time
/// * `Err(CalcError::InvalidInput)` - Negative or non-finite input
/// * `Err(CalcError::CalculationFailed)` - Pace or speed overflows
pub fn calculate(input: &PaceInput) -> CalcResult<PaceResult> {
    input.validate()?;

    let total_seconds = input.total_seconds()?;
    let pace_seconds = ensure_finite_result("pace", "pace", total_seconds / input.distance)?;
    let other_unit = input.unit.other();
    let other_pace_seconds = ensure_finite_result(
        "pace",
        "converted pace",
        input.unit.convert_pace(pace_seconds, other_unit),
    )?;

    let distance_km = input.unit.to_km(input.distance).value();
    let speed_kmh = ensure_finite_result("pace", "speed", distance_km / total_seconds * 3600.0)?;

    Ok(PaceResult {
        unit: input.unit,
        total_seconds,
        pace_seconds,
        pace: format_pace(pace_seconds),
        other_unit,
        other_pace_seconds,
        other_pace: format_pace(other_pace_seconds),
        speed_kmh,
        speed_mph: speed_kmh * MPH_PER_KMH,
    })
}
