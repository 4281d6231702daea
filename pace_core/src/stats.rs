//! # Usage Statistics
//!
//! `UsageStats` is the running summary shown in the stats bar: how many
//! calculations have been made, the last pace and VDOT, total calories and
//! a per-calculator usage histogram.
//!
//! ## Example
//!
//! ```rust
//! use pace_core::calculations::{calculate, CalculationInput, CalculatorKind, VdotInput};
//! use pace_core::stats::UsageStats;
//!
//! let mut stats = UsageStats::new();
//! let input = CalculationInput::Vdot(VdotInput {
//!     distance_m: 5000.0,
//!     minutes: 20.0,
//!     seconds: 0.0,
//! });
//! stats.record(&calculate(&input).unwrap());
//!
//! assert_eq!(stats.calculations, 1);
//! assert_eq!(stats.last_vdot.as_deref(), Some("49.8"));
//! assert_eq!(stats.favorite_calculator, Some(CalculatorKind::Vdot));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{CalculationResult, CalculatorKind};

/// Cumulative usage statistics, persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    /// Total successful calculations
    #[serde(default)]
    pub calculations: u64,

    /// Last pace computed, `M:SS`
    #[serde(default)]
    pub last_pace: Option<String>,

    /// Last VDOT score, one decimal place
    #[serde(default, rename = "lastVDOT")]
    pub last_vdot: Option<String>,

    /// Sum of all rounded calorie averages
    #[serde(default)]
    pub total_calories: u64,

    /// Uses per calculator
    #[serde(default)]
    pub calculator_usage: BTreeMap<CalculatorKind, u64>,

    /// Most used calculator; the earliest-declared kind wins a tie
    #[serde(default)]
    pub favorite_calculator: Option<CalculatorKind>,

    /// When these stats were first created
    #[serde(default = "Utc::now")]
    pub first_visit: DateTime<Utc>,
}

impl Default for UsageStats {
    fn default() -> Self {
        UsageStats::new()
    }
}

impl UsageStats {
    /// Empty stats stamped with the current time.
    pub fn new() -> Self {
        UsageStats {
            calculations: 0,
            last_pace: None,
            last_vdot: None,
            total_calories: 0,
            calculator_usage: BTreeMap::new(),
            favorite_calculator: None,
            first_visit: Utc::now(),
        }
    }

    /// Fold one successful calculation into the stats.
    pub fn record(&mut self, result: &CalculationResult) {
        self.calculations += 1;
        *self.calculator_usage.entry(result.kind()).or_insert(0) += 1;
        self.favorite_calculator = favorite(&self.calculator_usage);

        match result {
            CalculationResult::Vdot(r) => self.last_vdot = Some(r.display_score()),
            CalculationResult::Pace(r) => self.last_pace = Some(r.pace.clone()),
            CalculationResult::Calories(r) => {
                self.total_calories = self.total_calories.saturating_add(r.average_calories);
            }
            _ => {}
        }
    }

    /// Uses recorded for `kind`
    pub fn usage(&self, kind: CalculatorKind) -> u64 {
        self.calculator_usage.get(&kind).copied().unwrap_or(0)
    }

    /// Whether anything has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.calculations == 0
    }

    /// Display values for the stats bar
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            calculations: self.calculations.to_string(),
            last_pace: self.last_pace.clone().unwrap_or_else(|| "--:--".to_string()),
            last_vdot: self.last_vdot.clone().unwrap_or_else(|| "--".to_string()),
            total_calories: self.total_calories.to_string(),
            favorite_calculator: self
                .favorite_calculator
                .map(|k| k.display_name().to_string())
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}

/// Stats bar text, with placeholders for values not yet recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub calculations: String,
    pub last_pace: String,
    pub last_vdot: String,
    pub total_calories: String,
    pub favorite_calculator: String,
}

/// Key with the highest count; on a tie the first key in map order wins.
fn favorite(usage: &BTreeMap<CalculatorKind, u64>) -> Option<CalculatorKind> {
    let mut best: Option<(CalculatorKind, u64)> = None;
    for (&kind, &count) in usage {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((kind, count)),
        }
    }
    best.map(|(kind, _)| kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate, CalculationInput, CaloriesInput, PaceInput, VdotInput};
    use crate::units::DistanceUnit;

    fn vdot() -> CalculationResult {
        calculate(&CalculationInput::Vdot(VdotInput {
            distance_m: 10000.0,
            minutes: 40.0,
            seconds: 0.0,
        }))
        .unwrap()
    }

    fn pace() -> CalculationResult {
        calculate(&CalculationInput::Pace(PaceInput {
            distance: 5.0,
            hours: None,
            minutes: Some(22.0),
            seconds: Some(30.0),
            unit: DistanceUnit::Km,
        }))
        .unwrap()
    }

    fn calories() -> CalculationResult {
        calculate(&CalculationInput::Calories(CaloriesInput {
            weight_kg: 70.0,
            distance_km: 10.0,
            minutes: 50.0,
        }))
        .unwrap()
    }

    #[test]
    fn test_vdot_vdot_pace() {
        let mut stats = UsageStats::new();
        stats.record(&vdot());
        stats.record(&vdot());
        stats.record(&pace());

        assert_eq!(stats.calculations, 3);
        assert_eq!(stats.usage(CalculatorKind::Vdot), 2);
        assert_eq!(stats.usage(CalculatorKind::Pace), 1);
        assert_eq!(stats.calculator_usage.len(), 2);
        assert_eq!(stats.favorite_calculator, Some(CalculatorKind::Vdot));
        assert_eq!(stats.last_pace.as_deref(), Some("4:30"));
        assert_eq!(stats.last_vdot.as_deref(), Some("51.9"));
    }

    #[test]
    fn test_tie_goes_to_earliest_kind() {
        let mut stats = UsageStats::new();
        stats.record(&calories());
        stats.record(&pace());
        assert_eq!(stats.favorite_calculator, Some(CalculatorKind::Pace));

        stats.record(&calories());
        assert_eq!(stats.favorite_calculator, Some(CalculatorKind::Calories));
    }

    #[test]
    fn test_calories_accumulate() {
        let mut stats = UsageStats::new();
        stats.record(&calories());
        assert_eq!(stats.total_calories, 723);
        stats.record(&vdot());
        assert_eq!(stats.total_calories, 723);
        stats.record(&calories());
        assert_eq!(stats.total_calories, 1446);
    }

    #[test]
    fn test_summary_placeholders() {
        let summary = UsageStats::new().summary();
        assert_eq!(summary.calculations, "0");
        assert_eq!(summary.last_pace, "--:--");
        assert_eq!(summary.last_vdot, "--");
        assert_eq!(summary.total_calories, "0");
    }

    #[test]
    fn test_stored_shape() {
        let mut stats = UsageStats::new();
        stats.record(&vdot());
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"lastVDOT\":\"51.9\""));
        assert!(json.contains("\"calculatorUsage\":{\"vdot\":1}"));
        assert!(json.contains("\"favoriteCalculator\":\"vdot\""));

        let roundtrip: UsageStats = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, stats);
    }

    #[test]
    fn test_partial_record_loads() {
        let stats: UsageStats =
            serde_json::from_str(r#"{"calculations":4,"lastPace":"5:10"}"#).unwrap();
        assert_eq!(stats.calculations, 4);
        assert_eq!(stats.last_pace.as_deref(), Some("5:10"));
        assert!(stats.calculator_usage.is_empty());
    }
}
