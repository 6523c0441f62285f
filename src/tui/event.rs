//! Event handling for the dashboard.
//!
//! [`update`] is the only place [`App`] changes. Key presses become
//! [`Action`]s for the controller; gateway results come back as
//! [`Message`]s and are rendered here.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::ValidationError;
use crate::models::{
    CopilotAnswer, ExplanationResponse, HealthStatus, Issue, ReconciliationResult, Trade,
};

use super::app::{
    ANSWER_FAILED, App, ConnectionStatus, EXPLANATION_FAILED, Focus, LOADING_EXPLANATION, Mode,
    RECONCILE_FAILED, ReconcileState, THINKING,
};

/// Events that can occur in the terminal.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Outcome of one full load: both collections fetched once, side by side.
#[derive(Debug)]
pub struct LoadOutcome {
    pub trades: crate::Result<Vec<Trade>>,
    pub issues: crate::Result<Vec<Issue>>,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from the terminal.
    Input(Event),

    /// A full load finished.
    Loaded(LoadOutcome),
    /// The reconciliation request finished.
    Reconciled(crate::Result<ReconciliationResult>),
    /// The reconcile action is over, including its follow-up load.
    ReconcileSettled,
    /// An explanation request finished.
    Explanation {
        token: u64,
        issue_id: i64,
        result: crate::Result<ExplanationResponse>,
    },
    /// A copilot question was answered.
    Answer {
        token: u64,
        result: crate::Result<CopilotAnswer>,
    },
    /// Health probe finished.
    Health(crate::Result<HealthStatus>),

    /// Request to quit the application.
    Quit,
}

/// Work the controller performs outside the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Reload trades and issues.
    Refresh,
    /// Run reconciliation, then reload.
    Reconcile,
    /// Explain one issue; the response must carry `token`.
    Explain { issue_id: i64, token: u64 },
    /// Ask the copilot; the response must carry `token`.
    Ask { query: String, token: u64 },
    /// Probe the service health endpoint.
    CheckHealth,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Loaded(outcome) => {
            apply_load(app, outcome);
            None
        }
        Message::Reconciled(Ok(result)) => {
            info!(
                total = result.total,
                mismatches = result.issues.len(),
                anomalies = result.anomalies.len(),
                "reconciliation complete"
            );
            app.show_notice(result.summary());
            None
        }
        Message::Reconciled(Err(e)) => {
            error!(error = %e, "reconciliation failed");
            app.log_diagnostic(format!("Error running reconciliation: {e}"));
            app.show_notice(RECONCILE_FAILED);
            None
        }
        Message::ReconcileSettled => {
            app.reconcile = ReconcileState::Idle;
            None
        }
        Message::Explanation {
            token,
            issue_id,
            result,
        } => {
            if !app.accepts_response(token) {
                debug!(token, issue_id, "discarding stale explanation");
                return None;
            }
            match result {
                Ok(response) => app.render_explanation(&response.explanation),
                Err(e) => {
                    error!(error = %e, issue_id, "explanation failed");
                    app.log_diagnostic(format!("Error explaining issue {issue_id}: {e}"));
                    app.render_explanation(EXPLANATION_FAILED);
                }
            }
            None
        }
        Message::Answer { token, result } => {
            if !app.accepts_response(token) {
                debug!(token, "discarding stale answer");
                return None;
            }
            match result {
                Ok(response) => app.render_answer(&response.answer),
                Err(e) => {
                    error!(error = %e, "copilot query failed");
                    app.log_diagnostic(format!("Error asking copilot: {e}"));
                    app.render_answer(ANSWER_FAILED);
                }
            }
            None
        }
        Message::Health(Ok(health)) => {
            app.connection_status = if health.is_healthy() {
                ConnectionStatus::Online
            } else {
                ConnectionStatus::Degraded
            };
            None
        }
        Message::Health(Err(e)) => {
            warn!(error = %e, "health check failed");
            app.connection_status = ConnectionStatus::Offline;
            app.log_diagnostic(format!("Service unreachable: {e}"));
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Renders a full load. Each collection is applied on its own so one failed
/// fetch leaves the other table and its counters intact.
fn apply_load(app: &mut App, outcome: LoadOutcome) {
    let trades_ok = outcome.trades.is_ok();
    let issues_ok = outcome.issues.is_ok();

    match outcome.trades {
        Ok(trades) => {
            app.render_trades(&trades);
            app.render_trade_stats(&trades);
        }
        Err(e) => {
            error!(error = %e, "error loading trades");
            app.log_diagnostic(format!("Error loading trades: {e}"));
        }
    }

    match outcome.issues {
        Ok(issues) => {
            app.render_issues(&issues);
            app.render_issue_stats(&issues);
        }
        Err(e) => {
            error!(error = %e, "error loading issues");
            app.log_diagnostic(format!("Error loading issues: {e}"));
        }
    }

    app.connection_status = match (trades_ok, issues_ok) {
        (true, true) => ConnectionStatus::Online,
        (false, false) => ConnectionStatus::Offline,
        _ => ConnectionStatus::Degraded,
    };

    if trades_ok || issues_ok {
        info!(
            trades = app.stats.total_trades,
            pending = app.stats.pending_trades,
            issues = app.stats.total_issues,
            "dashboard refreshed"
        );
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_errors();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
        Mode::Notice => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.dismiss_notice();
            }
            None
        }
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('c') => start_reconcile(app),
        KeyCode::Tab => {
            app.next_focus();
            None
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        }
        KeyCode::Char('e') => app.selected_issue().map(|id| start_explain(app, id)),
        KeyCode::Enter => match app.focus {
            Focus::Issues => app.selected_issue().map(|id| start_explain(app, id)),
            Focus::Query => {
                app.mode = Mode::Insert;
                None
            }
            Focus::Trades => None,
        },
        KeyCode::Char('/') | KeyCode::Char('i') => {
            app.focus = Focus::Query;
            app.mode = Mode::Insert;
            None
        }
        _ => None,
    }
}

/// Handles keys while typing a question.
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            None
        }
        KeyCode::Enter => {
            app.mode = Mode::Normal;
            let query = app.query.as_str().to_string();
            start_ask(app, query)
        }
        KeyCode::Char(c) => {
            app.query.insert(c);
            None
        }
        KeyCode::Backspace => {
            app.query.backspace();
            None
        }
        KeyCode::Delete => {
            app.query.delete();
            None
        }
        KeyCode::Left => {
            app.query.move_left();
            None
        }
        KeyCode::Right => {
            app.query.move_right();
            None
        }
        KeyCode::Home => {
            app.query.move_home();
            None
        }
        KeyCode::End => {
            app.query.move_end();
            None
        }
        _ => None,
    }
}

/// Moves the reconcile trigger to in-flight, unless it already is.
pub fn start_reconcile(app: &mut App) -> Option<Action> {
    if app.reconcile == ReconcileState::InFlight {
        debug!("reconciliation already running");
        return None;
    }
    app.reconcile = ReconcileState::InFlight;
    Some(Action::Reconcile)
}

/// Shows the loading placeholder and requests an explanation.
pub fn start_explain(app: &mut App, issue_id: i64) -> Action {
    let token = app.begin_response(LOADING_EXPLANATION);
    Action::Explain { issue_id, token }
}

/// Validates the question, shows the thinking placeholder and requests an
/// answer. A blank question raises a notice instead.
pub fn start_ask(app: &mut App, query: String) -> Option<Action> {
    if query.trim().is_empty() {
        let err = ValidationError::EmptyQuery;
        warn!(error = %err, "copilot query rejected");
        app.show_notice(err.to_string());
        return None;
    }
    let token = app.begin_response(THINKING);
    Some(Action::Ask { query, token })
}
