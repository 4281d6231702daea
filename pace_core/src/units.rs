//! # Unit Types
//!
//! Type-safe wrappers for running distances plus the km/mile toggle the
//! pace calculator works in.
//!
//! ## Example
//!
//! ```rust
//! use pace_core::units::{DistanceUnit, Kilometers, Miles};
//!
//! let km = DistanceUnit::Mile.to_km(26.2);
//! assert!((km.value() - 42.1647).abs() < 1e-4);
//!
//! let miles: Miles = Kilometers(1.60934).into();
//! assert!((miles.value() - 1.0).abs() < 1e-12);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kilometres in one statute mile.
pub const KM_PER_MILE: f64 = 1.60934;

/// Miles per hour in one kilometre per hour.
pub const MPH_PER_KMH: f64 = 0.621371;

// ============================================================================
// Distance Units
// ============================================================================

/// Distance in kilometres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilometers(pub f64);

/// Distance in statute miles
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Miles(pub f64);

impl From<Kilometers> for Miles {
    fn from(km: Kilometers) -> Self {
        Miles(km.0 / KM_PER_MILE)
    }
}

impl From<Miles> for Kilometers {
    fn from(mi: Miles) -> Self {
        Kilometers(mi.0 * KM_PER_MILE)
    }
}

macro_rules! impl_value {
    ($type:ty) => {
        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_value!(Kilometers);
impl_value!(Miles);

// ============================================================================
// Distance unit toggle
// ============================================================================

/// The distance unit a pace is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// Kilometres (default)
    #[default]
    Km,
    /// Statute miles
    Mile,
}

impl DistanceUnit {
    /// The other unit of the toggle
    pub fn other(self) -> Self {
        match self {
            DistanceUnit::Km => DistanceUnit::Mile,
            DistanceUnit::Mile => DistanceUnit::Km,
        }
    }

    /// Short label used in reports ("km", "mile")
    pub fn label(self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Mile => "mile",
        }
    }

    /// Convert a distance in this unit to kilometres
    pub fn to_km(self, distance: f64) -> Kilometers {
        match self {
            DistanceUnit::Km => Kilometers(distance),
            DistanceUnit::Mile => Miles(distance).into(),
        }
    }

    /// Convert a pace (seconds per this unit) to seconds per `target` unit.
    ///
    /// A pace per mile is longer than the same effort per km, so moving to
    /// miles multiplies by [`KM_PER_MILE`].
    pub fn convert_pace(self, seconds_per_unit: f64, target: DistanceUnit) -> f64 {
        match (self, target) {
            (DistanceUnit::Km, DistanceUnit::Mile) => seconds_per_unit * KM_PER_MILE,
            (DistanceUnit::Mile, DistanceUnit::Km) => seconds_per_unit / KM_PER_MILE,
            _ => seconds_per_unit,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Ok(DistanceUnit::Km),
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Mile),
            other => Err(format!("unknown distance unit '{}' (expected km or mile)", other)),
        }
    }
}
