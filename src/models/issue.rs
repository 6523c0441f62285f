//! Reconciliation issues.

use serde::Deserialize;

/// An open issue as returned by `GET /issues/`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Issue {
    pub id: i64,
    pub issue_type: String,
    pub description: String,
    /// `LOW`, `MEDIUM`, `HIGH` or `CRITICAL`.
    pub severity: String,
    /// Reference to the affected trade, if any.
    #[serde(default)]
    pub trade_id: Option<String>,
}

impl Issue {
    /// Returns the linked trade reference, treating an empty string as absent.
    pub fn linked_trade(&self) -> Option<&str> {
        self.trade_id.as_deref().filter(|id| !id.is_empty())
    }
}
