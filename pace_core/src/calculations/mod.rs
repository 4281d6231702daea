//! # Running Calculations
//!
//! This module contains all calculator types. Each calculation follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`vdot`] - VDOT score and training paces
//! - [`pace`] - Pace and speed, per km or per mile
//! - [`splits`] - Even-pace race splits
//! - [`heart_rate`] - Heart-rate training zones
//! - [`race_predict`] - Riegel race time prediction
//! - [`calories`] - Calorie burn estimate

pub mod calories;
pub mod heart_rate;
pub mod pace;
pub mod race_predict;
pub mod splits;
pub mod vdot;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite_result, ensure_non_negative, CalcResult};

// Re-export commonly used types
pub use calories::{CaloriesInput, CaloriesResult};
pub use heart_rate::{HeartRateInput, HeartRateResult};
pub use pace::{PaceInput, PaceResult};
pub use race_predict::{RacePredictInput, RacePredictResult};
pub use splits::{SplitsInput, SplitsResult};
pub use vdot::{VdotInput, VdotResult};

/// The six calculators.
///
/// Declaration order is also the usage-map key order, which decides ties
/// for the favourite calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    Vdot,
    Pace,
    Splits,
    HeartRateZones,
    RacePredictor,
    Calories,
}

impl CalculatorKind {
    /// All calculators in declaration order
    pub const ALL: [CalculatorKind; 6] = [
        CalculatorKind::Vdot,
        CalculatorKind::Pace,
        CalculatorKind::Splits,
        CalculatorKind::HeartRateZones,
        CalculatorKind::RacePredictor,
        CalculatorKind::Calories,
    ];

    /// Stable key used in stored stats and analytics labels
    pub fn key(self) -> &'static str {
        match self {
            CalculatorKind::Vdot => "vdot",
            CalculatorKind::Pace => "pace",
            CalculatorKind::Splits => "splits",
            CalculatorKind::HeartRateZones => "heart_rate_zones",
            CalculatorKind::RacePredictor => "race_predictor",
            CalculatorKind::Calories => "calories",
        }
    }

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            CalculatorKind::Vdot => "VDOT",
            CalculatorKind::Pace => "Pace",
            CalculatorKind::Splits => "Splits",
            CalculatorKind::HeartRateZones => "Heart-Rate Zones",
            CalculatorKind::RacePredictor => "Race Predictor",
            CalculatorKind::Calories => "Calories",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Enum wrapper for all calculation inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculationInput {
    Vdot(VdotInput),
    Pace(PaceInput),
    Splits(SplitsInput),
    HeartRateZones(HeartRateInput),
    RacePredictor(RacePredictInput),
    Calories(CaloriesInput),
}

impl CalculationInput {
    /// Which calculator this input is for
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationInput::Vdot(_) => CalculatorKind::Vdot,
            CalculationInput::Pace(_) => CalculatorKind::Pace,
            CalculationInput::Splits(_) => CalculatorKind::Splits,
            CalculationInput::HeartRateZones(_) => CalculatorKind::HeartRateZones,
            CalculationInput::RacePredictor(_) => CalculatorKind::RacePredictor,
            CalculationInput::Calories(_) => CalculatorKind::Calories,
        }
    }
}

/// Enum wrapper for all calculation results, mirroring [`CalculationInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculationResult {
    Vdot(VdotResult),
    Pace(PaceResult),
    Splits(SplitsResult),
    HeartRateZones(HeartRateResult),
    RacePredictor(RacePredictResult),
    Calories(CaloriesResult),
}

impl CalculationResult {
    /// Which calculator produced this result
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationResult::Vdot(_) => CalculatorKind::Vdot,
            CalculationResult::Pace(_) => CalculatorKind::Pace,
            CalculationResult::Splits(_) => CalculatorKind::Splits,
            CalculationResult::HeartRateZones(_) => CalculatorKind::HeartRateZones,
            CalculationResult::RacePredictor(_) => CalculatorKind::RacePredictor,
            CalculationResult::Calories(_) => CalculatorKind::Calories,
        }
    }

    /// Headline number reported with the completion analytics event.
    pub fn completion_value(&self) -> Option<f64> {
        match self {
            CalculationResult::Vdot(r) => Some(r.vdot.round()),
            CalculationResult::Pace(r) => Some(r.pace_seconds.round()),
            CalculationResult::Calories(r) => Some(r.average_calories as f64),
            _ => None,
        }
    }
}

/// Run the calculator matching `input`.
///
/// # Example
///
/// ```rust
/// use pace_core::calculations::{calculate, CalculationInput, CalculationResult, CaloriesInput};
///
/// let input = CalculationInput::Calories(CaloriesInput {
///     weight_kg: 70.0,
///     distance_km: 10.0,
///     minutes: 50.0,
/// });
/// match calculate(&input).unwrap() {
///     CalculationResult::Calories(r) => assert_eq!(r.average_calories, 723),
///     _ => unreachable!(),
/// }
/// ```
pub fn calculate(input: &CalculationInput) -> CalcResult<CalculationResult> {
    Ok(match input {
        CalculationInput::Vdot(i) => CalculationResult::Vdot(vdot::calculate(i)?),
        CalculationInput::Pace(i) => CalculationResult::Pace(pace::calculate(i)?),
        CalculationInput::Splits(i) => CalculationResult::Splits(splits::calculate(i)?),
        CalculationInput::HeartRateZones(i) => {
            CalculationResult::HeartRateZones(heart_rate::calculate(i)?)
        }
        CalculationInput::RacePredictor(i) => {
            CalculationResult::RacePredictor(race_predict::calculate(i)?)
        }
        CalculationInput::Calories(i) => CalculationResult::Calories(calories::calculate(i)?),
    })
}

/// `h·3600 + m·60 + s`, absent components counting as zero.
pub(crate) fn elapsed_seconds(
    hours: Option<f64>,
    minutes: Option<f64>,
    seconds: Option<f64>,
) -> CalcResult<f64> {
    let h = ensure_non_negative("hours", hours.unwrap_or(0.0))?;
    let m = ensure_non_negative("minutes", minutes.unwrap_or(0.0))?;
    let s = ensure_non_negative("seconds", seconds.unwrap_or(0.0))?;
    ensure_finite_result("time", "elapsed time", h * 3600.0 + m * 60.0 + s)
}
