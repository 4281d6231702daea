//! # Calorie Estimate
//!
//! Averages a MET-based estimate with the "1 kcal per kg per km" rule of
//! thumb.
//!
//! ```text
//! speed  = distance / minutes · 60            (km/h)
//! MET    = table lookup on speed
//! met    = MET · weight · minutes / 60
//! simple = weight · distance
//! avg    = round((met + simple) / 2)
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite_result, ensure_positive, CalcError, CalcResult};

/// Upper speed bound (km/h, exclusive) and MET value, ascending.
const MET_TABLE: [(f64, f64); 7] = [
    (6.4, 6.0),
    (8.0, 8.3),
    (9.7, 9.8),
    (11.3, 11.0),
    (12.9, 12.8),
    (14.5, 14.5),
    (16.1, 16.0),
];

/// MET for speeds at or above the last table bound
const MET_MAX: f64 = 19.0;

/// Input parameters for a calorie estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloriesInput {
    /// Body weight in kg
    pub weight_kg: f64,

    /// Distance run in km
    pub distance_km: f64,

    /// Elapsed time in minutes
    pub minutes: f64,
}

impl CaloriesInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("weight_kg", self.weight_kg)?;
        ensure_positive("distance_km", self.distance_km)?;
        ensure_positive("minutes", self.minutes)?;
        Ok(())
    }
}

/// Results from a calorie estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloriesResult {
    pub speed_kmh: f64,
    pub met: f64,
    pub met_calories: f64,
    pub simple_calories: f64,
    /// Rounded average of the two estimates
    pub average_calories: u64,
}

/// MET value for running at `speed_kmh`.
pub fn met_for_speed(speed_kmh: f64) -> f64 {
    MET_TABLE
        .iter()
        .find(|&&(bound, _)| speed_kmh < bound)
        .map(|&(_, met)| met)
        .unwrap_or(MET_MAX)
}

/// Estimate calories burned.
///
/// Fails with `CalcError::CalculationFailed` when an estimate overflows or
/// the average does not fit the running calorie total.
pub fn calculate(input: &CaloriesInput) -> CalcResult<CaloriesResult> {
    input.validate()?;

    let speed_kmh = ensure_finite_result(
        "calories",
        "speed",
        input.distance_km / input.minutes * 60.0,
    )?;
    let met = met_for_speed(speed_kmh);
    let met_calories = ensure_finite_result(
        "calories",
        "MET estimate",
        met * input.weight_kg * (input.minutes / 60.0),
    )?;
    let simple_calories =
        ensure_finite_result("calories", "simple estimate", input.weight_kg * input.distance_km)?;
    let average = ensure_finite_result(
        "calories",
        "average",
        ((met_calories + simple_calories) / 2.0).round(),
    )?;
    // 2^64 is the first f64 above u64::MAX
    if average >= u64::MAX as f64 {
        return Err(CalcError::calculation_failed(
            "calories",
            format!("average is out of range ({})", average),
        ));
    }
    let average_calories = average as u64;

    Ok(CaloriesResult {
        speed_kmh,
        met,
        met_calories,
        simple_calories,
        average_calories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[test]
    fn test_ten_k_in_fifty_minutes() {
        let input = CaloriesInput {
            weight_kg: 70.0,
            distance_km: 10.0,
            minutes: 50.0,
        };
        let result = calculate(&input).unwrap();
        assert!((result.speed_kmh - 12.0).abs() < 1e-12);
        assert_eq!(result.met, 12.8);
        assert!((result.met_calories - 746.67).abs() < 0.01);
        assert_eq!(result.simple_calories, 700.0);
        assert_eq!(result.average_calories, 723);
    }

    #[test]
    fn test_met_table_bounds() {
        assert_eq!(met_for_speed(5.0), 6.0);
        assert_eq!(met_for_speed(6.4), 8.3);
        assert_eq!(met_for_speed(9.69), 9.8);
        assert_eq!(met_for_speed(16.0), 16.0);
        assert_eq!(met_for_speed(16.1), 19.0);
        assert_eq!(met_for_speed(25.0), 19.0);
    }

    #[test]
    fn test_zero_time_rejected() {
        let input = CaloriesInput {
            weight_kg: 70.0,
            distance_km: 10.0,
            minutes: 0.0,
        };
        assert_eq!(calculate(&input).unwrap_err(), CalcError::division_by_zero("minutes"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let input = CaloriesInput {
            weight_kg: -70.0,
            distance_km: 10.0,
            minutes: 50.0,
        };
        assert_eq!(calculate(&input).unwrap_err().field(), Some("weight_kg"));
    }

    #[test]
    fn test_overflowing_weight_rejected() {
        let input = CaloriesInput {
            weight_kg: 1e308,
            distance_km: 10.0,
            minutes: 50.0,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_average_beyond_total_range_rejected() {
        let input = CaloriesInput {
            weight_kg: 1e18,
            distance_km: 100.0,
            minutes: 600.0,
        };
        assert!(matches!(
            calculate(&input),
            Err(CalcError::CalculationFailed { .. })
        ));
    }
}
