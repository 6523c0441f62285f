//! Deserialization tests for the reconciliation service payloads.

use rust_decimal_macros::dec;

use opspilot::models::{
    CopilotAnswer, CopilotQuery, ExplanationResponse, HealthStatus, Issue, ReconciliationResult,
    Trade,
};

const TRADES_JSON: &str = include_str!("fixtures/trades.json");
const ISSUES_JSON: &str = include_str!("fixtures/issues.json");
const RECONCILE_JSON: &str = include_str!("fixtures/reconcile.json");
const EXPLANATION_JSON: &str = include_str!("fixtures/explanation.json");
const ANSWER_JSON: &str = include_str!("fixtures/answer.json");
const HEALTH_JSON: &str = include_str!("fixtures/health.json");

#[test]
fn test_trades_deserialize() {
    let trades: Vec<Trade> =
        serde_json::from_str(TRADES_JSON).expect("Failed to deserialize trades");

    assert_eq!(trades.len(), 3);
    let trade = &trades[1];
    assert_eq!(trade.id, 2);
    assert_eq!(trade.trade_id, "T002");
    assert_eq!(trade.trader, "bob");
    assert_eq!(trade.instrument, "MSFT");
    assert_eq!(trade.quantity, dec!(50));
    assert_eq!(trade.price, dec!(310.456));
    assert_eq!(trade.side, "SELL");
    assert_eq!(trade.status, "settled");

    // Integer prices are accepted too.
    assert_eq!(trades[0].price, dec!(10));
    assert!(trades[0].is_pending());
    assert!(!trades[1].is_pending());
}

#[test]
fn test_issues_deserialize_with_null_trade() {
    let issues: Vec<Issue> =
        serde_json::from_str(ISSUES_JSON).expect("Failed to deserialize issues");

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].id, 11);
    assert_eq!(issues[0].severity, "HIGH");
    assert_eq!(issues[0].linked_trade(), Some("T001"));
    assert_eq!(issues[1].trade_id, None);
    assert_eq!(issues[1].linked_trade(), None);
}

#[test]
fn test_issue_without_trade_field_deserializes() {
    let issue: Issue = serde_json::from_str(
        r#"{"id": 5, "issue_type": "X", "description": "d", "severity": "LOW"}"#,
    )
    .expect("Failed to deserialize issue");

    assert_eq!(issue.trade_id, None);
}

#[test]
fn test_reconciliation_result_deserializes() {
    let result: ReconciliationResult =
        serde_json::from_str(RECONCILE_JSON).expect("Failed to deserialize reconcile result");

    assert_eq!(result.total, 3);
    assert_eq!(result.issues.len(), 2);
    assert_eq!(result.anomalies.len(), 1);

    let mismatch = &result.issues[1];
    assert_eq!(mismatch.kind, "AMOUNT_MISMATCH");
    assert_eq!(mismatch.trade_id.as_deref(), Some("T002"));
    assert_eq!(mismatch.expected, Some(dec!(15522.8)));
    assert_eq!(mismatch.actual, Some(dec!(15000)));
    assert_eq!(result.issues[0].expected, None);

    let anomaly = &result.anomalies[0];
    assert_eq!(anomaly.kind, "ANOMALOUS_QUANTITY");
    assert_eq!(anomaly.quantity, Some(dec!(5000)));
    assert_eq!(anomaly.severity, "MEDIUM");
}

#[test]
fn test_reconciliation_summary_reports_counts() {
    let result: ReconciliationResult =
        serde_json::from_str(RECONCILE_JSON).expect("Failed to deserialize reconcile result");

    let summary = result.summary();
    assert!(summary.starts_with("Reconciliation complete!"));
    assert!(summary.contains("Issues found: 3"));
    assert!(summary.contains("Trade/Ledger mismatches: 2"));
    assert!(summary.contains("Anomalies: 1"));
}

#[test]
fn test_copilot_payloads() {
    let explanation: ExplanationResponse =
        serde_json::from_str(EXPLANATION_JSON).expect("Failed to deserialize explanation");
    assert!(explanation.explanation.starts_with("Issue: MISSING_LEDGER_ENTRY\n"));

    let answer: CopilotAnswer =
        serde_json::from_str(ANSWER_JSON).expect("Failed to deserialize answer");
    assert!(answer.answer.contains("Pending Trades: 2"));

    let body = serde_json::to_value(CopilotQuery {
        query: "what is pending?",
    })
    .expect("Failed to serialize query");
    assert_eq!(body, serde_json::json!({ "query": "what is pending?" }));
}

#[test]
fn test_health_deserializes() {
    let health: HealthStatus =
        serde_json::from_str(HEALTH_JSON).expect("Failed to deserialize health");
    assert!(health.is_healthy());
    assert_eq!(health.timestamp.as_deref(), Some("2024-01-15T12:00:00.000000"));
}

#[test]
fn test_malformed_trade_is_rejected() {
    let result: Result<Vec<Trade>, _> = serde_json::from_str(r#"[{"id": 1, "trader": "x"}]"#);
    assert!(result.is_err());
}
