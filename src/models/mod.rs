//! Wire models for the OpsPilot reconciliation service.
//!
//! Every type mirrors a JSON payload returned (or accepted) by one of the
//! service endpoints. Fields the dashboard does not display are ignored on
//! deserialisation.

pub mod copilot;
pub mod issue;
pub mod reconcile;
pub mod trade;

pub use copilot::{CopilotAnswer, CopilotQuery, ExplanationResponse};
pub use issue::Issue;
pub use reconcile::{AnomalyRecord, MismatchRecord, ReconciliationResult};
pub use trade::Trade;

use serde::Deserialize;

/// Response from `GET /health`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    /// Returns `true` when the service reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
