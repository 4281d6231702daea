//! # VDOT Calculation
//!
//! Estimates a runner's VDOT from a single race performance and derives the
//! five training pace ranges from it.
//!
//! ## Method
//!
//! ```text
//! t        = minutes + seconds / 60
//! v        = distance / t                                   (m/min)
//! VO2      = -4.60 + 0.182258·v + 0.000104·v²
//! %max     = 0.8 + 0.1894393·e^(-0.012778·t) + 0.2989558·e^(-0.1932605·t)
//! VDOT     = VO2 / %max
//! ```
//!
//! Training paces invert the VO2 relation: for a target VO2 the positive
//! root of `0.000104·v² + 0.182258·v + (-4.60 - VO2) = 0` gives the
//! velocity, and `pace = (1000 / v)·60` seconds per km.
//!
//! ## Example
//!
//! ```rust
//! use pace_core::calculations::vdot::{calculate, VdotInput};
//!
//! let input = VdotInput { distance_m: 5000.0, minutes: 20.0, seconds: 0.0 };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.display_score(), "49.8");
//! assert_eq!(result.training_paces.len(), 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{
    ensure_finite_result, ensure_non_negative, ensure_positive, CalcError, CalcResult,
};
use crate::time_format::format_pace;

/// VO2 cost constant term (ml/kg/min)
const VO2_INTERCEPT: f64 = -4.60;
/// Linear velocity coefficient
const VO2_LINEAR: f64 = 0.182258;
/// Quadratic velocity coefficient
const VO2_QUADRATIC: f64 = 0.000104;

/// Input parameters for a VDOT estimate.
///
/// ## JSON Example
///
/// ```json
/// { "distance_m": 10000.0, "minutes": 40.0, "seconds": 0.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VdotInput {
    /// Race distance in metres
    pub distance_m: f64,

    /// Whole minutes of the finishing time
    pub minutes: f64,

    /// Remaining seconds of the finishing time
    #[serde(default)]
    pub seconds: f64,
}

impl VdotInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("distance_m", self.distance_m)?;
        ensure_non_negative("minutes", self.minutes)?;
        ensure_non_negative("seconds", self.seconds)?;
        if self.total_minutes() <= 0.0 {
            return Err(CalcError::division_by_zero("time"));
        }
        Ok(())
    }

    /// Elapsed time in decimal minutes
    pub fn total_minutes(&self) -> f64 {
        self.minutes + self.seconds / 60.0
    }
}

/// Named training intensity with its fraction-of-VDOT bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingZone {
    Easy,
    Marathon,
    Threshold,
    Interval,
    Repetition,
}

impl TrainingZone {
    /// All zones, slowest first
    pub const ALL: [TrainingZone; 5] = [
        TrainingZone::Easy,
        TrainingZone::Marathon,
        TrainingZone::Threshold,
        TrainingZone::Interval,
        TrainingZone::Repetition,
    ];

    /// `(min, max)` fraction of VDOT for the zone
    pub fn vo2_fraction(self) -> (f64, f64) {
        match self {
            TrainingZone::Easy => (0.59, 0.74),
            TrainingZone::Marathon => (0.75, 0.84),
            TrainingZone::Threshold => (0.83, 0.88),
            TrainingZone::Interval => (0.95, 0.98),
            TrainingZone::Repetition => (1.05, 1.20),
        }
    }

    /// Display name ("Easy", "Marathon", ...)
    pub fn display_name(self) -> &'static str {
        match self {
            TrainingZone::Easy => "Easy",
            TrainingZone::Marathon => "Marathon",
            TrainingZone::Threshold => "Threshold",
            TrainingZone::Interval => "Interval",
            TrainingZone::Repetition => "Repetition",
        }
    }
}

/// A pace range in seconds per kilometre.
///
/// `fast` comes from the zone's upper VO2 bound, `slow` from the lower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceRange {
    pub fast_s_per_km: f64,
    pub slow_s_per_km: f64,
}

impl PaceRange {
    /// Format as `M:SS - M:SS`
    pub fn format(&self) -> String {
        format!("{} - {}", format_pace(self.fast_s_per_km), format_pace(self.slow_s_per_km))
    }
}

/// Pace range for one training zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonePace {
    pub zone: TrainingZone,
    pub range: PaceRange,
}

/// Results from a VDOT estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VdotResult {
    /// The VDOT score
    pub vdot: f64,

    /// Elapsed time in decimal minutes
    pub total_minutes: f64,

    /// Average race velocity (m/min)
    pub velocity_m_per_min: f64,

    /// Oxygen cost of the race velocity (ml/kg/min)
    pub vo2: f64,

    /// Fraction of VO2max sustainable for the race duration
    pub percent_max: f64,

    /// Training paces, slowest zone first
    pub training_paces: Vec<ZonePace>,
}

impl VdotResult {
    /// Score rounded to one decimal, as shown in the stats bar
    pub fn display_score(&self) -> String {
        format!("{:.1}", self.vdot)
    }

    /// Pace range for a single zone
    pub fn pace_for(&self, zone: TrainingZone) -> Option<&PaceRange> {
        self.training_paces
            .iter()
            .find(|zp| zp.zone == zone)
            .map(|zp| &zp.range)
    }
}

/// Oxygen cost (ml/kg/min) of running at `velocity` m/min.
pub fn vo2_from_velocity(velocity: f64) -> f64 {
    VO2_INTERCEPT + VO2_LINEAR * velocity + VO2_QUADRATIC * velocity * velocity
}

/// Fraction of VO2max that can be held for `total_minutes`.
pub fn percent_max(total_minutes: f64) -> f64 {
    0.8 + 0.1894393 * (-0.012778 * total_minutes).exp()
        + 0.2989558 * (-0.1932605 * total_minutes).exp()
}

/// Velocity (m/min) whose oxygen cost is `vo2`; the positive quadratic root.
pub fn velocity_from_vo2(vo2: f64) -> CalcResult<f64> {
    let a = VO2_QUADRATIC;
    let b = VO2_LINEAR;
    let c = VO2_INTERCEPT - vo2;
    let discriminant = b * b - 4.0 * a * c;
    if !discriminant.is_finite() || discriminant < 0.0 {
        return Err(CalcError::calculation_failed(
            "VDOT",
            format!("no real velocity for VO2 {:.3}", vo2),
        ));
    }

    let velocity = (-b + discriminant.sqrt()) / (2.0 * a);
    if velocity <= 0.0 {
        return Err(CalcError::calculation_failed(
            "VDOT",
            format!("VO2 {:.3} is below the resting cost of running", vo2),
        ));
    }
    Ok(velocity)
}

/// Pace range (s/km) for a zone spanning `min_percent..max_percent` of VDOT.
pub fn pace_range_from_vdot(
    vdot: f64,
    min_percent: f64,
    max_percent: f64,
) -> CalcResult<PaceRange> {
    let slow_velocity = velocity_from_vo2(vdot * min_percent)?;
    let fast_velocity = velocity_from_vo2(vdot * max_percent)?;

    Ok(PaceRange {
        fast_s_per_km: (1000.0 / fast_velocity) * 60.0,
        slow_s_per_km: (1000.0 / slow_velocity) * 60.0,
    })
}

/// Pace ranges for all five training zones.
pub fn training_paces(vdot: f64) -> CalcResult<Vec<ZonePace>> {
    if !vdot.is_finite() || vdot <= 0.0 {
        return Err(CalcError::invalid_input("vdot", vdot.to_string(), "VDOT must be positive"));
    }

    TrainingZone::ALL
        .iter()
        .map(|&zone| {
            let (min, max) = zone.vo2_fraction();
            pace_range_from_vdot(vdot, min, max).map(|range| ZonePace { zone, range })
        })
        .collect()
}

/// Estimate VDOT from a race result.
///
/// # Returns
///
/// * `Ok(VdotResult)` - Score and training paces
/// * `Err(CalcError::DivisionByZero)` - Zero elapsed time or distance
/// * `Err(CalcError::InvalidInput)` - Negative or non-finite input
/// * `Err(CalcError::CalculationFailed)` - Performance too slow to yield a positive VDOT
pub fn calculate(input: &VdotInput) -> CalcResult<VdotResult> {
    input.validate()?;

    let total_minutes = input.total_minutes();
    let velocity = input.distance_m / total_minutes;
    let vo2 = vo2_from_velocity(velocity);
    let percent_max = percent_max(total_minutes);
    let vdot = ensure_finite_result("VDOT", "VDOT", vo2 / percent_max)?;
    if vdot <= 0.0 {
        return Err(CalcError::calculation_failed(
            "VDOT",
            format!("{:.1} m/min is too slow to estimate a VDOT", velocity),
        ));
    }

    Ok(VdotResult {
        vdot,
        total_minutes,
        velocity_m_per_min: velocity,
        vo2,
        percent_max,
        training_paces: training_paces(vdot)?,
    })
}
