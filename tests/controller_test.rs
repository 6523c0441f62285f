//! End-to-end dashboard behaviour against a scripted service.

mod common;

use std::sync::Arc;

use crossterm::event::KeyCode;

use opspilot::config::UiConfig;
use opspilot::lifecycle::Dashboard;
use opspilot::models::ReconciliationResult;
use opspilot::tui::app::{ConnectionStatus, Focus, Mode, RECONCILE_FAILED, ReconcileState};
use opspilot::tui::view::{IssuesTable, NO_ISSUES_TEXT, NO_TRADE_MARKER, Stats};

use common::{ScriptedApi, fixture_issues, fixture_trades, issue, key, settle, step_once};

fn dashboard(api: &Arc<ScriptedApi>) -> Dashboard {
    Dashboard::new(api.clone(), &UiConfig::default())
}

#[tokio::test]
async fn test_initial_load_renders_tables_and_stats() {
    let api = Arc::new(ScriptedApi::new(fixture_trades(), fixture_issues()));
    let mut dashboard = dashboard(&api);

    dashboard.start();
    settle(&mut dashboard).await;

    let app = dashboard.app();
    assert_eq!(app.trade_rows.len(), 3);
    assert_eq!(app.trade_rows[0].price, "10.00");
    assert_eq!(app.trade_rows[1].price, "310.46");
    assert_eq!(app.trade_rows[2].price, "140.50");
    assert_eq!(app.trade_rows[2].trader.as_str(), "<b>carol</b>");
    assert_eq!(app.trade_rows[2].side.class, "badge-buy");

    let rows = app.issues.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].trade_id.as_str(), "T001");
    assert_eq!(rows[1].trade_id.as_str(), NO_TRADE_MARKER);

    assert_eq!(
        app.stats,
        Stats {
            total_trades: 3,
            pending_trades: 2,
            total_issues: 2,
        }
    );
    assert_eq!(app.connection_status, ConnectionStatus::Online);
}

#[tokio::test]
async fn test_full_load_fetches_each_collection_once() {
    let api = Arc::new(ScriptedApi::new(fixture_trades(), fixture_issues()));
    let mut dashboard = dashboard(&api);

    dashboard.handle(key(KeyCode::Char('r')));
    settle(&mut dashboard).await;

    let calls = api.calls();
    assert_eq!(calls.iter().filter(|c| **c == "trades").count(), 1);
    assert_eq!(calls.iter().filter(|c| **c == "issues").count(), 1);
}

#[tokio::test]
async fn test_empty_issue_list_renders_placeholder() {
    let api = Arc::new(ScriptedApi::new(fixture_trades(), Vec::new()));
    let mut dashboard = dashboard(&api);

    dashboard.start();
    settle(&mut dashboard).await;

    let app = dashboard.app();
    assert_eq!(app.issues, IssuesTable::Placeholder(NO_ISSUES_TEXT));
    assert_eq!(app.issues.row_count(), 1);
    assert_eq!(app.stats.total_issues, 0);
}

#[tokio::test]
async fn test_issues_failure_does_not_block_trades() {
    let api = Arc::new(ScriptedApi::new(fixture_trades(), vec![issue(1, None)]));
    let mut dashboard = dashboard(&api);

    dashboard.start();
    settle(&mut dashboard).await;
    assert_eq!(dashboard.app().issues.rows().len(), 1);

    // Trades change while the issues endpoint goes down.
    *api.trades.lock().unwrap() = Some(fixture_trades()[..1].to_vec());
    *api.issues.lock().unwrap() = None;

    dashboard.handle(key(KeyCode::Char('r')));
    settle(&mut dashboard).await;

    let app = dashboard.app();
    assert_eq!(app.trade_rows.len(), 1);
    assert_eq!(app.stats.total_trades, 1);
    assert_eq!(app.stats.pending_trades, 1);

    // Issues keep their prior state.
    assert_eq!(app.issues.rows().len(), 1);
    assert_eq!(app.issues.rows()[0].issue_id, 1);
    assert_eq!(app.stats.total_issues, 1);

    assert!(
        app.diagnostics
            .iter()
            .any(|d| d.starts_with("Error loading issues"))
    );
    assert_eq!(app.connection_status, ConnectionStatus::Degraded);
}

#[tokio::test]
async fn test_trades_failure_does_not_block_issues() {
    let api = Arc::new(ScriptedApi::new(Vec::new(), fixture_issues()));
    *api.trades.lock().unwrap() = None;
    let mut dashboard = dashboard(&api);

    dashboard.handle(key(KeyCode::Char('r')));
    settle(&mut dashboard).await;

    let app = dashboard.app();
    assert!(app.trade_rows.is_empty());
    assert_eq!(app.issues.rows().len(), 2);
    assert_eq!(app.stats.total_issues, 2);
    assert!(
        app.diagnostics
            .iter()
            .any(|d| d.starts_with("Error loading trades"))
    );
}

#[tokio::test]
async fn test_blank_question_never_reaches_the_service() {
    let api = Arc::new(ScriptedApi::new(Vec::new(), Vec::new()));
    let mut dashboard = dashboard(&api);

    for query in ["", "   "] {
        dashboard.app_mut().query.set(query);
        dashboard.app_mut().focus = Focus::Query;
        dashboard.app_mut().mode = Mode::Insert;
        dashboard.handle(key(KeyCode::Enter));
        assert_eq!(
            dashboard.app().notices.back().map(String::as_str),
            Some("Please enter a question")
        );
        dashboard.handle(key(KeyCode::Enter));
    }
    settle(&mut dashboard).await;

    assert!(!api.calls().contains(&"ask"));
    assert_eq!(dashboard.app().response, "");
    assert_eq!(dashboard.app().mode, Mode::Normal);
}

#[tokio::test]
async fn test_question_shows_thinking_then_answer() {
    let api = Arc::new(ScriptedApi::new(Vec::new(), Vec::new()));
    let mut dashboard = dashboard(&api);

    dashboard.handle(key(KeyCode::Char('/')));
    for c in "pending?".chars() {
        dashboard.handle(key(KeyCode::Char(c)));
    }
    dashboard.handle(key(KeyCode::Enter));
    assert_eq!(dashboard.app().response, "Thinking...");

    settle(&mut dashboard).await;
    assert_eq!(dashboard.app().response, "answer to pending?");
}

#[tokio::test]
async fn test_reconcile_reports_summary_then_reloads() {
    let api = Arc::new(ScriptedApi::new(fixture_trades(), fixture_issues()));
    *api.reconcile.lock().unwrap() = Some(ReconciliationResult {
        total: 5,
        issues: serde_json::from_value(serde_json::json!([
            {"type": "MISSING_LEDGER_ENTRY", "trade_id": "T1", "severity": "HIGH"},
            {"type": "AMOUNT_MISMATCH", "trade_id": "T2", "severity": "CRITICAL"}
        ]))
        .unwrap(),
        anomalies: serde_json::from_value(serde_json::json!([
            {"type": "ANOMALOUS_QUANTITY", "trade_id": "T3", "severity": "MEDIUM"}
        ]))
        .unwrap(),
    });
    let mut dashboard = dashboard(&api);

    dashboard.handle(key(KeyCode::Char('c')));
    assert_eq!(dashboard.app().reconcile, ReconcileState::InFlight);

    settle(&mut dashboard).await;

    let app = dashboard.app();
    let notice = app.notices.front().expect("summary notice");
    assert!(notice.contains("Issues found: 5"));
    assert!(notice.contains("Trade/Ledger mismatches: 2"));
    assert!(notice.contains("Anomalies: 1"));
    assert_eq!(app.reconcile, ReconcileState::Idle);

    // The reload follows the reconciliation.
    let calls = api.calls();
    let reconciled_at = calls.iter().position(|c| *c == "reconcile").unwrap();
    assert!(calls[reconciled_at..].contains(&"trades"));
    assert!(calls[reconciled_at..].contains(&"issues"));
    assert_eq!(app.trade_rows.len(), 3);
}

#[tokio::test]
async fn test_reconcile_failure_returns_to_idle() {
    let api = Arc::new(ScriptedApi::new(fixture_trades(), fixture_issues()));
    let mut dashboard = dashboard(&api);

    dashboard.handle(key(KeyCode::Char('c')));
    settle(&mut dashboard).await;

    let app = dashboard.app();
    assert_eq!(app.reconcile, ReconcileState::Idle);
    assert_eq!(
        app.notices.front().map(String::as_str),
        Some(RECONCILE_FAILED)
    );
    assert_eq!(api.calls(), vec!["reconcile"]);

    // The trigger works again once the notice is dismissed.
    dashboard.handle(key(KeyCode::Enter));
    dashboard.handle(key(KeyCode::Char('c')));
    assert_eq!(dashboard.app().reconcile, ReconcileState::InFlight);
}

#[tokio::test]
async fn test_explain_race_is_last_resolved_wins() {
    let api = Arc::new(ScriptedApi::new(
        Vec::new(),
        vec![issue(1, Some("T1")), issue(2, None)],
    ));
    let mut dashboard = dashboard(&api);
    dashboard.handle(key(KeyCode::Char('r')));
    settle(&mut dashboard).await;

    let release_first = api.gate_explanation(1);
    let release_second = api.gate_explanation(2);

    dashboard.handle(key(KeyCode::Char('e')));
    assert_eq!(dashboard.app().response, "Loading explanation...");
    dashboard.handle(key(KeyCode::Down));
    dashboard.handle(key(KeyCode::Char('e')));

    release_second.send(()).unwrap();
    step_once(&mut dashboard).await;
    assert_eq!(dashboard.app().response, "explanation for 2");

    release_first.send(()).unwrap();
    step_once(&mut dashboard).await;
    assert_eq!(dashboard.app().response, "explanation for 1");
}

#[tokio::test]
async fn test_explain_race_can_discard_stale_responses() {
    let api = Arc::new(ScriptedApi::new(
        Vec::new(),
        vec![issue(1, Some("T1")), issue(2, None)],
    ));
    let config = UiConfig {
        discard_stale_responses: true,
        ..UiConfig::default()
    };
    let mut dashboard = Dashboard::new(api.clone(), &config);
    dashboard.handle(key(KeyCode::Char('r')));
    settle(&mut dashboard).await;

    let release_first = api.gate_explanation(1);
    let release_second = api.gate_explanation(2);

    dashboard.handle(key(KeyCode::Char('e')));
    dashboard.handle(key(KeyCode::Down));
    dashboard.handle(key(KeyCode::Char('e')));

    release_second.send(()).unwrap();
    step_once(&mut dashboard).await;
    release_first.send(()).unwrap();
    step_once(&mut dashboard).await;

    assert_eq!(dashboard.app().response, "explanation for 2");
}
