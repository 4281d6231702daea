//! # pace_core - Running Calculation Engine
//!
//! `pace_core` is the computational heart of Stride: running-performance
//! calculators with a clean, JSON-friendly API, plus the usage statistics
//! folded from their results.
//!
//! ## Design Philosophy
//!
//! - **Stateless formulas**: Pure functions that take input and return results
//! - **Typed failures**: Invalid input is an error, never a `NaN` result
//! - **JSON-First**: All inputs, results and errors implement Serialize/Deserialize
//! - **Explicit state**: Stats, store and analytics live in a [`Session`], not globals
//!
//! ## Quick Start
//!
//! ```rust
//! use pace_core::calculations::{calculate, CalculationInput, CalculationResult, VdotInput};
//!
//! let input = CalculationInput::Vdot(VdotInput {
//!     distance_m: 10000.0,
//!     minutes: 40.0,
//!     seconds: 0.0,
//! });
//! if let CalculationResult::Vdot(result) = calculate(&input).unwrap() {
//!     assert_eq!(result.display_score(), "51.9");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The six calculators
//! - [`stats`] - Usage statistics aggregator
//! - [`session`] - One calculation as an analytics + formula + stats + storage transaction
//! - [`storage`] - Key-value persistence (memory and file backed)
//! - [`analytics`] - Optional usage event sink
//! - [`config`] - User settings and data directory
//! - [`units`] - Distance units and the km/mile toggle
//! - [`time_format`] - `H:MM:SS` / `M:SS` formatting
//! - [`errors`] - Structured error types

pub mod analytics;
pub mod calculations;
pub mod config;
pub mod errors;
pub mod session;
pub mod stats;
pub mod storage;
pub mod time_format;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, CalculationInput, CalculationResult, CalculatorKind};
pub use errors::{CalcError, CalcResult};
pub use session::Session;
pub use stats::{StatsSummary, UsageStats};
