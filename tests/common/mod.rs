//! Shared test utilities: fixtures, a scripted service and key helpers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::oneshot;

use opspilot::error::{Resource, TransportError, TransportErrorKind};
use opspilot::gateway::ReconApi;
use opspilot::lifecycle::Dashboard;
use opspilot::models::{
    CopilotAnswer, ExplanationResponse, HealthStatus, Issue, ReconciliationResult, Trade,
};
use opspilot::tui::{Event, Message};

pub const TRADES_JSON: &str = include_str!("../fixtures/trades.json");
pub const ISSUES_JSON: &str = include_str!("../fixtures/issues.json");
pub const RECONCILE_JSON: &str = include_str!("../fixtures/reconcile.json");

pub fn fixture_trades() -> Vec<Trade> {
    serde_json::from_str(TRADES_JSON).expect("trades fixture")
}

pub fn fixture_issues() -> Vec<Issue> {
    serde_json::from_str(ISSUES_JSON).expect("issues fixture")
}

pub fn issue(id: i64, trade_id: Option<&str>) -> Issue {
    Issue {
        id,
        issue_type: "AMOUNT_MISMATCH".to_string(),
        description: format!("issue {id}"),
        severity: "CRITICAL".to_string(),
        trade_id: trade_id.map(String::from),
    }
}

fn unavailable(resource: Resource) -> opspilot::OpsPilotError {
    TransportError::new(resource, TransportErrorKind::Status(503)).into()
}

/// In-memory service whose replies are set by the test.
///
/// `None` in a reply slot makes that endpoint fail with a 503. Every call is
/// recorded by name in `calls`.
pub struct ScriptedApi {
    pub trades: Mutex<Option<Vec<Trade>>>,
    pub issues: Mutex<Option<Vec<Issue>>>,
    pub reconcile: Mutex<Option<ReconciliationResult>>,
    pub calls: Mutex<Vec<&'static str>>,
    explain_gates: Mutex<HashMap<i64, oneshot::Receiver<()>>>,
}

impl ScriptedApi {
    pub fn new(trades: Vec<Trade>, issues: Vec<Issue>) -> Self {
        Self {
            trades: Mutex::new(Some(trades)),
            issues: Mutex::new(Some(issues)),
            reconcile: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            explain_gates: Mutex::new(HashMap::new()),
        }
    }

    /// Holds the explanation for `issue_id` until the returned sender fires.
    pub fn gate_explanation(&self, issue_id: i64) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.explain_gates.lock().unwrap().insert(issue_id, rx);
        tx
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }
}

#[async_trait]
impl ReconApi for ScriptedApi {
    async fn list_trades(&self) -> opspilot::Result<Vec<Trade>> {
        self.record("trades");
        self.trades
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| unavailable(Resource::Trades))
    }

    async fn list_issues(&self) -> opspilot::Result<Vec<Issue>> {
        self.record("issues");
        self.issues
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| unavailable(Resource::Issues))
    }

    async fn run_reconciliation(&self) -> opspilot::Result<ReconciliationResult> {
        self.record("reconcile");
        self.reconcile
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| unavailable(Resource::Reconciliation))
    }

    async fn explain_issue(&self, issue_id: i64) -> opspilot::Result<ExplanationResponse> {
        self.record("explain");
        let gate = self.explain_gates.lock().unwrap().remove(&issue_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(ExplanationResponse {
            explanation: format!("explanation for {issue_id}"),
        })
    }

    async fn ask_question(&self, query: &str) -> opspilot::Result<CopilotAnswer> {
        self.record("ask");
        Ok(CopilotAnswer {
            answer: format!("answer to {query}"),
        })
    }

    async fn health(&self) -> opspilot::Result<HealthStatus> {
        self.record("health");
        Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: None,
        })
    }
}

/// A key press as delivered by the event reader.
pub fn key(code: KeyCode) -> Message {
    Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

/// Applies messages until none arrives for a short while.
pub async fn settle(dashboard: &mut Dashboard) {
    while let Ok(true) = tokio::time::timeout(Duration::from_millis(200), dashboard.step()).await {}
}

/// Applies exactly one message, failing the test if none arrives.
pub async fn step_once(dashboard: &mut Dashboard) {
    let progressed = tokio::time::timeout(Duration::from_secs(2), dashboard.step())
        .await
        .expect("timed out waiting for a message");
    assert!(progressed, "event channel closed");
}
