//! # Calculation Session
//!
//! A `Session` runs one calculation at a time as a single blocking
//! transaction:
//!
//! 1. send the `calculate` analytics event
//! 2. run the formula (an error stops here; stats are untouched)
//! 3. fold the result into [`UsageStats`]
//! 4. persist the stats
//! 5. send the `calculator_complete` event when the result has a headline value
//!
//! A persistence failure is logged and the session carries on in memory;
//! the caller still gets its result.
//!
//! ## Example
//!
//! ```rust
//! use pace_core::analytics::Analytics;
//! use pace_core::calculations::{CalculationInput, SplitsInput};
//! use pace_core::session::Session;
//! use pace_core::storage::MemoryStore;
//!
//! let mut session = Session::open(MemoryStore::new(), Analytics::disabled());
//! let input = CalculationInput::Splits(SplitsInput {
//!     pace_minutes: 5.0,
//!     pace_seconds: 0.0,
//!     distance_km: 10.0,
//! });
//! session.run(&input).unwrap();
//! assert_eq!(session.stats().calculations, 1);
//! ```

use tracing::{debug, warn};

use crate::analytics::Analytics;
use crate::calculations::{self, CalculationInput, CalculationResult};
use crate::errors::CalcResult;
use crate::stats::{StatsSummary, UsageStats};
use crate::storage::{self, FormData, KeyValueStore};

/// Stats, form values and collaborators for one user on one device.
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    /// `None` once the store has failed; the session is then in-memory only
    store: Option<S>,
    stats: UsageStats,
    form: FormData,
    returning_visitor: bool,
    analytics: Analytics,
}

impl<S: KeyValueStore> Session<S> {
    /// Load stats and form values from `store` and mark the visit.
    pub fn open(mut store: S, analytics: Analytics) -> Self {
        let stats = storage::load_stats(&store);
        let form = storage::load_form_data(&store);
        let returning_visitor = storage::is_returning_visitor(&store);

        let mut session = Session {
            store: None,
            stats,
            form,
            returning_visitor,
            analytics,
        };

        match storage::mark_returning_visitor(&mut store) {
            Ok(()) => session.store = Some(store),
            Err(e) => warn!(error = %e, "local storage unavailable, stats will not be saved"),
        }

        debug!(
            calculations = session.stats.calculations,
            returning = session.returning_visitor,
            persistent = session.is_persistent(),
            "session opened"
        );
        session
    }

    /// Run one calculation and record it.
    pub fn run(&mut self, input: &CalculationInput) -> CalcResult<CalculationResult> {
        let kind = input.kind();
        let detail = match input {
            CalculationInput::Pace(p) => Some(p.unit.label()),
            _ => None,
        };
        self.analytics.track_calculator(kind, detail);

        let result = calculations::calculate(input)?;
        debug!(calculator = kind.key(), "calculation complete");

        self.stats.record(&result);
        self.persist(|store, session| storage::save_stats(store, &session.stats));

        if let Some(value) = result.completion_value() {
            self.analytics.track_calculator_complete(kind, Some(value));
        }
        Ok(result)
    }

    /// Remember the values last typed into the forms.
    pub fn remember_form(&mut self, form: FormData) {
        self.form = form;
        self.persist(|store, session| storage::save_form_data(store, &session.form));
    }

    pub fn stats(&self) -> &UsageStats {
        &self.stats
    }

    /// Stats bar values
    pub fn summary(&self) -> StatsSummary {
        self.stats.summary()
    }

    pub fn form_data(&self) -> &FormData {
        &self.form
    }

    /// Whether a previous session had run on this store
    pub fn is_returning_visitor(&self) -> bool {
        self.returning_visitor
    }

    /// Whether changes still reach the store
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Hand back the store, if it is still usable.
    pub fn into_store(self) -> Option<S> {
        self.store
    }

    fn persist<F>(&mut self, write: F)
    where
        F: FnOnce(&mut S, &Self) -> CalcResult<()>,
    {
        let Some(mut store) = self.store.take() else {
            return;
        };
        match write(&mut store, self) {
            Ok(()) => self.store = Some(store),
            Err(e) => warn!(error = %e, "local storage write failed, continuing in memory"),
        }
    }
}
