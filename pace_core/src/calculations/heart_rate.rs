//! # Heart-Rate Zones
//!
//! Five training zones from a maximum heart rate. When a resting heart rate
//! is supplied the Karvonen (heart-rate reserve) method is used:
//!
//! ```text
//! bpm = rest + (max - rest) · fraction
//! ```
//!
//! otherwise a plain percentage of maximum, `bpm = max · fraction`. Each
//! bound is rounded to the nearest beat on its own.
//!
//! ## Example
//!
//! ```rust
//! use pace_core::calculations::heart_rate::{calculate, HeartRateInput, HrMethod};
//!
//! let result = calculate(&HeartRateInput { max_hr: 190, resting_hr: None }).unwrap();
//! assert_eq!(result.method, HrMethod::PercentOfMax);
//! assert_eq!((result.zones[0].min_bpm, result.zones[0].max_bpm), (95, 114));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Highest max heart rate accepted as plausible
const MAX_PLAUSIBLE_HR: u32 = 250;

/// Zone definition: (name, description, min fraction, max fraction)
const ZONES: [(&str, &str, f64, f64); 5] = [
    ("Zone 1 - Easy", "Recovery, warm-up", 0.5, 0.6),
    ("Zone 2 - Aerobic", "Base building", 0.6, 0.7),
    ("Zone 3 - Tempo", "Marathon pace", 0.7, 0.8),
    ("Zone 4 - Threshold", "Lactate threshold", 0.8, 0.9),
    ("Zone 5 - VO2 Max", "Maximum effort", 0.9, 1.0),
];

/// Input parameters for heart-rate zones.
///
/// `validate` accepts a max heart rate of 1 to 250 bpm and a resting rate
/// strictly below the max. Anything outside that is `CalcError::InvalidInput`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateInput {
    /// Maximum heart rate (bpm)
    pub max_hr: u32,

    /// Resting heart rate (bpm); zero or absent selects percent-of-max
    #[serde(default)]
    pub resting_hr: Option<u32>,
}

impl HeartRateInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.max_hr == 0 || self.max_hr > MAX_PLAUSIBLE_HR {
            return Err(CalcError::invalid_input(
                "max_hr",
                self.max_hr.to_string(),
                format!("Max heart rate must be between 1 and {} bpm", MAX_PLAUSIBLE_HR),
            ));
        }
        if let Some(rest) = self.resting() {
            if rest >= self.max_hr {
                return Err(CalcError::invalid_input(
                    "resting_hr",
                    rest.to_string(),
                    "Resting heart rate must be below max heart rate",
                ));
            }
        }
        Ok(())
    }

    /// Resting heart rate if it selects the Karvonen method
    pub fn resting(&self) -> Option<u32> {
        self.resting_hr.filter(|&hr| hr > 0)
    }
}

/// How the zone bounds were derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrMethod {
    PercentOfMax,
    Karvonen,
}

/// One heart-rate zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZone {
    /// 1-based zone number
    pub number: u8,
    pub name: String,
    pub description: String,
    pub min_fraction: f64,
    pub max_fraction: f64,
    pub min_bpm: u32,
    pub max_bpm: u32,
}

/// Results from a heart-rate zone calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateResult {
    pub method: HrMethod,
    pub zones: Vec<HeartRateZone>,
}

/// Calculate the five heart-rate zones.
pub fn calculate(input: &HeartRateInput) -> CalcResult<HeartRateResult> {
    input.validate()?;

    let max = f64::from(input.max_hr);
    let (method, base, span) = match input.resting() {
        Some(rest) => {
            let rest = f64::from(rest);
            (HrMethod::Karvonen, rest, max - rest)
        }
        None => (HrMethod::PercentOfMax, 0.0, max),
    };
    let bpm = |fraction: f64| (base + span * fraction).round() as u32;

    let zones = ZONES
        .iter()
        .zip(1u8..)
        .map(|(&(name, description, min, max), number)| HeartRateZone {
            number,
            name: name.to_string(),
            description: description.to_string(),
            min_fraction: min,
            max_fraction: max,
            min_bpm: bpm(min),
            max_bpm: bpm(max),
        })
        .collect();

    Ok(HeartRateResult { method, zones })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(result: &HeartRateResult) -> Vec<(u32, u32)> {
        result.zones.iter().map(|z| (z.min_bpm, z.max_bpm)).collect()
    }

    #[test]
    fn test_percent_of_max() {
        let result = calculate(&HeartRateInput {
            max_hr: 190,
            resting_hr: None,
        })
        .unwrap();
        assert_eq!(result.method, HrMethod::PercentOfMax);
        assert_eq!(
            bounds(&result),
            vec![(95, 114), (114, 133), (133, 152), (152, 171), (171, 190)]
        );
        assert_eq!(result.zones[4].name, "Zone 5 - VO2 Max");
    }

    #[test]
    fn test_zero_resting_uses_percent_of_max() {
        let result = calculate(&HeartRateInput {
            max_hr: 190,
            resting_hr: Some(0),
        })
        .unwrap();
        assert_eq!(result.method, HrMethod::PercentOfMax);
        assert_eq!(result.zones[0].min_bpm, 95);
    }

    #[test]
    fn test_karvonen() {
        let result = calculate(&HeartRateInput {
            max_hr: 190,
            resting_hr: Some(60),
        })
        .unwrap();
        assert_eq!(result.method, HrMethod::Karvonen);
        assert_eq!(
            bounds(&result),
            vec![(125, 138), (138, 151), (151, 164), (164, 177), (177, 190)]
        );
    }

    #[test]
    fn test_resting_above_max_rejected() {
        let err = calculate(&HeartRateInput {
            max_hr: 150,
            resting_hr: Some(160),
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("resting_hr"));
    }

    #[test]
    fn test_zero_max_rejected() {
        let err = calculate(&HeartRateInput {
            max_hr: 0,
            resting_hr: None,
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_max_hr_cap() {
        assert!(calculate(&HeartRateInput {
            max_hr: 250,
            resting_hr: None,
        })
        .is_ok());
        let err = calculate(&HeartRateInput {
            max_hr: 251,
            resting_hr: None,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("max_hr"));
    }
}
