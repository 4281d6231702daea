//! # Race Time Prediction
//!
//! Riegel's power-law model scales a known performance to other distances:
//!
//! ```text
//! T2 = T1 · (D2 / D1)^1.06
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pace_core::calculations::race_predict::{calculate, RacePredictInput};
//!
//! let input = RacePredictInput {
//!     distance_m: 10000.0,
//!     hours: None,
//!     minutes: Some(40.0),
//!     seconds: None,
//! };
//! let result = calculate(&input).unwrap();
//! // The 10K itself is not predicted
//! assert_eq!(result.predictions.len(), 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::elapsed_seconds;
use crate::errors::{ensure_finite_result, ensure_positive, CalcError, CalcResult};
use crate::time_format::format_duration;

/// Fatigue exponent of the Riegel model
pub const RIEGEL_EXPONENT: f64 = 1.06;

/// Standard race distances predicted: (name, metres)
pub const RACES: [(&str, f64); 4] = [
    ("5K", 5000.0),
    ("10K", 10000.0),
    ("Half Marathon", 21097.5),
    ("Marathon", 42195.0),
];

/// Input parameters for a race prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacePredictInput {
    /// Distance of the known performance, in metres
    pub distance_m: f64,

    #[serde(default)]
    pub hours: Option<f64>,

    #[serde(default)]
    pub minutes: Option<f64>,

    #[serde(default)]
    pub seconds: Option<f64>,
}

impl RacePredictInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("distance_m", self.distance_m)?;
        if self.known_seconds()? <= 0.0 {
            return Err(CalcError::division_by_zero("time"));
        }
        Ok(())
    }

    /// Known finishing time in seconds
    pub fn known_seconds(&self) -> CalcResult<f64> {
        elapsed_seconds(self.hours, self.minutes, self.seconds)
    }
}

/// Predicted time for one race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacePrediction {
    pub name: String,
    pub distance_m: f64,
    pub seconds: f64,
    pub time: String,
}

/// Results from a race prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacePredictResult {
    pub known_distance_m: f64,
    pub known_seconds: f64,
    pub predictions: Vec<RacePrediction>,
}

/// Riegel-scaled time for `target_m` from `known_seconds` over `known_m`.
pub fn riegel(known_seconds: f64, known_m: f64, target_m: f64) -> f64 {
    known_seconds * (target_m / known_m).powf(RIEGEL_EXPONENT)
}

/// Predict standard race times, skipping the race run at exactly the
/// known distance.
///
/// A known distance so short that a scaled time overflows fails with
/// `CalcError::CalculationFailed`.
pub fn calculate(input: &RacePredictInput) -> CalcResult<RacePredictResult> {
    input.validate()?;

    let known_seconds = input.known_seconds()?;
    let predictions = RACES
        .iter()
        .filter(|&&(_, meters)| meters != input.distance_m)
        .map(|&(name, meters)| {
            let seconds = ensure_finite_result(
                "race_predictor",
                name,
                riegel(known_seconds, input.distance_m, meters),
            )?;
            Ok(RacePrediction {
                name: name.to_string(),
                distance_m: meters,
                seconds,
                time: format_duration(seconds),
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    Ok(RacePredictResult {
        known_distance_m: input.distance_m,
        known_seconds,
        predictions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_k_forty() -> RacePredictInput {
        RacePredictInput {
            distance_m: 10000.0,
            hours: None,
            minutes: Some(40.0),
            seconds: None,
        }
    }

    #[test]
    fn test_marathon_from_ten_k() {
        let result = calculate(&ten_k_forty()).unwrap();
        let marathon = result
            .predictions
            .iter()
            .find(|p| p.name == "Marathon")
            .unwrap();

        let expected = 2400.0 * (42195.0_f64 / 10000.0).powf(1.06);
        assert_eq!(marathon.seconds, expected);
        assert!((marathon.seconds - 11040.48).abs() < 0.01);
        assert_eq!(marathon.time, "3:04:00");
    }

    #[test]
    fn test_known_distance_excluded() {
        let result = calculate(&ten_k_forty()).unwrap();
        let names: Vec<&str> = result.predictions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["5K", "Half Marathon", "Marathon"]);
    }

    #[test]
    fn test_off_standard_distance_predicts_all() {
        let input = RacePredictInput {
            distance_m: 8000.0,
            hours: None,
            minutes: Some(32.0),
            seconds: None,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.predictions.len(), 4);
        assert!(result.predictions.windows(2).all(|w| w[0].seconds < w[1].seconds));
    }

    #[test]
    fn test_shorter_race_is_faster_per_km() {
        let result = calculate(&ten_k_forty()).unwrap();
        let five_k = &result.predictions[0];
        assert_eq!(five_k.time, "19:11");
        assert!(five_k.seconds < 1200.0);
    }

    #[test]
    fn test_zero_time_rejected() {
        let input = RacePredictInput {
            minutes: Some(0.0),
            ..ten_k_forty()
        };
        assert_eq!(calculate(&input).unwrap_err(), CalcError::division_by_zero("time"));
    }

    #[test]
    fn test_zero_distance_rejected() {
        let input = RacePredictInput {
            distance_m: 0.0,
            ..ten_k_forty()
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_vanishing_distance_overflows() {
        let input = RacePredictInput {
            distance_m: 1e-310,
            ..ten_k_forty()
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(err.to_string().contains("5K"));
    }
}
