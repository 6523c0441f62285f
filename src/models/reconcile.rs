//! Reconciliation run results.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Response from `POST /reconcile/`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ReconciliationResult {
    /// Total number of findings (mismatches plus anomalies).
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<MismatchRecord>,
    #[serde(default)]
    pub anomalies: Vec<AnomalyRecord>,
}

impl ReconciliationResult {
    /// Text shown to the operator once the run has completed.
    pub fn summary(&self) -> String {
        format!(
            "Reconciliation complete!\n\nIssues found: {}\n- Trade/Ledger mismatches: {}\n- Anomalies: {}",
            self.total,
            self.issues.len(),
            self.anomalies.len()
        )
    }
}

/// A trade whose ledger entries are missing or do not add up.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MismatchRecord {
    /// `MISSING_LEDGER_ENTRY` or `AMOUNT_MISMATCH`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub trade_id: Option<String>,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub expected: Option<Decimal>,
    #[serde(default)]
    pub actual: Option<Decimal>,
}

/// A statistically unusual trade.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AnomalyRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub trade_id: Option<String>,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub quantity: Option<Decimal>,
}
