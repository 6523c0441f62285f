//! Copilot request and response bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /copilot/query`.
#[derive(Debug, Serialize)]
pub struct CopilotQuery<'a> {
    pub query: &'a str,
}

/// Response from `POST /copilot/explain/{issue_id}`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ExplanationResponse {
    pub explanation: String,
}

/// Response from `POST /copilot/query`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CopilotAnswer {
    pub answer: String,
}
