//! # Usage Analytics
//!
//! Fire-and-forget events sent when a calculation starts and, for the
//! calculators with a headline number, when it completes. The sink is an
//! optional collaborator: with no sink configured nothing is sent, and a
//! failing sink never affects a calculation.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculations::CalculatorKind;

/// Category attached to every calculator event
pub const CALCULATOR_CATEGORY: &str = "calculator";

/// A single analytics event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event name (`calculate`, `calculator_complete`)
    pub name: String,
    pub category: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl AnalyticsEvent {
    /// A calculation was started. `detail` refines the label, e.g. the
    /// active unit of the pace calculator (`pace:km`).
    pub fn calculate(kind: CalculatorKind, detail: Option<&str>) -> Self {
        let label = match detail {
            Some(detail) => format!("{}:{}", kind.key(), detail),
            None => kind.key().to_string(),
        };
        AnalyticsEvent {
            name: "calculate".to_string(),
            category: CALCULATOR_CATEGORY.to_string(),
            label,
            value: None,
        }
    }

    /// A calculation finished with headline `value`.
    pub fn calculator_complete(kind: CalculatorKind, value: Option<f64>) -> Self {
        AnalyticsEvent {
            name: "calculator_complete".to_string(),
            category: CALCULATOR_CATEGORY.to_string(),
            label: kind.key().to_string(),
            value,
        }
    }
}

/// Why a sink rejected an event.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("analytics sink unavailable: {0}")]
    Unavailable(String),
    #[error("analytics event rejected: {0}")]
    Rejected(String),
}

/// Receiver of analytics events.
pub trait AnalyticsSink {
    fn send(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Sink that writes events as structured log records.
#[derive(Debug, Clone)]
pub struct TracingSink {
    client_id: Uuid,
}

impl TracingSink {
    pub fn new() -> Self {
        TracingSink {
            client_id: Uuid::new_v4(),
        }
    }

    /// Anonymous id stamped on every event from this sink
    pub fn client_id(&self) -> Uuid {
        self.client_id
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsSink for TracingSink {
    fn send(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        info!(
            target: "stride::analytics",
            client_id = %self.client_id,
            event = %event.name,
            category = %event.category,
            label = %event.label,
            value = ?event.value,
            "analytics event"
        );
        Ok(())
    }
}

/// Optional analytics collaborator.
#[derive(Default)]
pub struct Analytics {
    sink: Option<Box<dyn AnalyticsSink>>,
}

impl Analytics {
    /// Analytics that sends to `sink`
    pub fn new(sink: Box<dyn AnalyticsSink>) -> Self {
        Analytics { sink: Some(sink) }
    }

    /// Analytics that sends nothing
    pub fn disabled() -> Self {
        Analytics { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Send `event`, swallowing any failure.
    pub fn track(&self, event: AnalyticsEvent) {
        let Some(sink) = &self.sink else {
            debug!(event = %event.name, "analytics disabled, event dropped");
            return;
        };
        if let Err(e) = sink.send(&event) {
            warn!(event = %event.name, error = %e, "analytics event not sent");
        }
    }

    pub fn track_calculator(&self, kind: CalculatorKind, detail: Option<&str>) {
        self.track(AnalyticsEvent::calculate(kind, detail));
    }

    pub fn track_calculator_complete(&self, kind: CalculatorKind, value: Option<f64>) {
        self.track(AnalyticsEvent::calculator_complete(kind, value));
    }
}

impl std::fmt::Debug for Analytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analytics")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
