//! Application state for the dashboard.
//!
//! [`App`] is everything currently on screen. It is only mutated from the
//! event loop, and every region is replaced wholesale by the `render_*`
//! methods: the remote service stays the single source of truth.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::UiConfig;
use crate::models::{Issue, Trade};

use super::input::text_input::TextInput;
use super::view::{IssuesTable, Stats, TradeRow, pending_count};

/// Maximum number of lines kept in the diagnostics log.
const MAX_DIAGNOSTICS: usize = 50;

/// How long an error stays in the status bar.
const ERROR_DISPLAY_TIME: Duration = Duration::from_secs(5);

/// Placeholder shown while an explanation is requested.
pub const LOADING_EXPLANATION: &str = "Loading explanation...";
/// Placeholder shown when an explanation request fails.
pub const EXPLANATION_FAILED: &str = "Error getting explanation";
/// Placeholder shown while a question is answered.
pub const THINKING: &str = "Thinking...";
/// Placeholder shown when a question cannot be answered.
pub const ANSWER_FAILED: &str = "Error getting response";
/// Notice shown when a reconciliation run fails.
pub const RECONCILE_FAILED: &str = "Error running reconciliation";

/// Central application state container.
pub struct App {
    // -- Tables --
    /// Rows of the trades table, from the latest successful fetch.
    pub trade_rows: Vec<TradeRow>,
    /// Body of the issues table, from the latest successful fetch.
    pub issues: IssuesTable,
    /// Summary counters.
    pub stats: Stats,
    /// Selected row in the trades table.
    pub trade_cursor: usize,
    /// Selected row in the issues table.
    pub issue_cursor: usize,

    // -- Copilot --
    /// Text of the single copilot response region.
    pub response: String,
    /// Token of the latest request issued for the response region.
    pub response_token: u64,
    /// Free-text question input.
    pub query: TextInput,

    // -- Reconcile Trigger --
    pub reconcile: ReconcileState,

    // -- Notices and Diagnostics --
    /// Blocking notices, oldest first. The front one is on screen.
    pub notices: VecDeque<String>,
    /// Recent failures, newest last.
    pub diagnostics: VecDeque<String>,
    /// Error flashed in the status bar (clears after a timeout).
    pub error_message: Option<ErrorDisplay>,

    // -- UI State --
    pub focus: Focus,
    pub mode: Mode,
    pub connection_status: ConnectionStatus,
    pub discard_stale_responses: bool,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an empty dashboard.
    pub fn new(config: &UiConfig) -> Self {
        Self {
            trade_rows: Vec::new(),
            issues: IssuesTable::default(),
            stats: Stats::default(),
            trade_cursor: 0,
            issue_cursor: 0,

            response: String::new(),
            response_token: 0,
            query: TextInput::new(),

            reconcile: ReconcileState::Idle,

            notices: VecDeque::new(),
            diagnostics: VecDeque::with_capacity(MAX_DIAGNOSTICS),
            error_message: None,

            focus: Focus::Issues,
            mode: Mode::Normal,
            connection_status: ConnectionStatus::Connecting,
            discard_stale_responses: config.discard_stale_responses,

            should_quit: false,
        }
    }

    /// Replaces the trades table.
    pub fn render_trades(&mut self, trades: &[Trade]) {
        self.trade_rows = trades.iter().map(TradeRow::from_trade).collect();
        self.trade_cursor = clamp_cursor(self.trade_cursor, self.trade_rows.len());
    }

    /// Replaces the issues table.
    pub fn render_issues(&mut self, issues: &[Issue]) {
        self.issues = IssuesTable::build(issues);
        self.issue_cursor = clamp_cursor(self.issue_cursor, self.issues.rows().len());
    }

    /// Updates the three summary counters.
    pub fn render_stats(&mut self, total_trades: usize, pending_trades: usize, total_issues: usize) {
        self.stats = Stats {
            total_trades,
            pending_trades,
            total_issues,
        };
    }

    /// Updates the trade counters from a fresh trade list.
    pub fn render_trade_stats(&mut self, trades: &[Trade]) {
        self.render_stats(trades.len(), pending_count(trades), self.stats.total_issues);
    }

    /// Updates the issue counter from a fresh issue list.
    pub fn render_issue_stats(&mut self, issues: &[Issue]) {
        self.render_stats(
            self.stats.total_trades,
            self.stats.pending_trades,
            issues.len(),
        );
    }

    /// Overwrites the response region with an explanation.
    pub fn render_explanation(&mut self, text: &str) {
        self.response = text.to_string();
    }

    /// Overwrites the response region with a copilot answer.
    pub fn render_answer(&mut self, text: &str) {
        self.response = text.to_string();
    }

    /// Starts a new request for the response region.
    ///
    /// Shows `placeholder` and returns the token the response must carry.
    pub fn begin_response(&mut self, placeholder: &str) -> u64 {
        self.response_token += 1;
        self.response = placeholder.to_string();
        self.response_token
    }

    /// Returns whether a response carrying `token` may still be shown.
    pub fn accepts_response(&self, token: u64) -> bool {
        !self.discard_stale_responses || token == self.response_token
    }

    /// Returns the id of the issue under the cursor, if any.
    pub fn selected_issue(&self) -> Option<i64> {
        self.issues.rows().get(self.issue_cursor).map(|r| r.issue_id)
    }

    /// Moves the cursor of the focused table down.
    pub fn select_next(&mut self) {
        let (cursor, len) = match self.focus {
            Focus::Trades => (&mut self.trade_cursor, self.trade_rows.len()),
            Focus::Issues => (&mut self.issue_cursor, self.issues.rows().len()),
            Focus::Query => return,
        };
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    /// Moves the cursor of the focused table up.
    pub fn select_previous(&mut self) {
        match self.focus {
            Focus::Trades => self.trade_cursor = self.trade_cursor.saturating_sub(1),
            Focus::Issues => self.issue_cursor = self.issue_cursor.saturating_sub(1),
            Focus::Query => {}
        }
    }

    /// Cycles focus between the two tables and the query input.
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Trades => Focus::Issues,
            Focus::Issues => Focus::Query,
            Focus::Query => Focus::Trades,
        };
    }

    /// Queues a blocking notice.
    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.notices.push_back(message.into());
        self.mode = Mode::Notice;
    }

    /// Dismisses the notice on screen.
    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
        if self.notices.is_empty() {
            self.mode = Mode::Normal;
        }
    }

    /// Records a failure in the diagnostics log and flashes it.
    pub fn log_diagnostic(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.diagnostics.len() >= MAX_DIAGNOSTICS {
            self.diagnostics.pop_front();
        }
        self.diagnostics.push_back(message.clone());
        self.show_error(message);
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than five seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > ERROR_DISPLAY_TIME
        {
            self.error_message = None;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&UiConfig::default())
    }
}

fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

/// State of the reconcile trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReconcileState {
    #[default]
    Idle,
    InFlight,
}

impl ReconcileState {
    /// Returns the trigger label.
    pub fn label(&self) -> &'static str {
        match self {
            ReconcileState::Idle => "🔍 Run Reconciliation",
            ReconcileState::InFlight => "⏳ Running...",
        }
    }
}

/// UI focus targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    Trades,
    #[default]
    Issues,
    Query,
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing into the query input.
    Insert,
    /// A notice is on screen and swallows keys until dismissed.
    Notice,
}

/// Reachability of the reconciliation service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Online,
    Degraded,
    Offline,
}

impl ConnectionStatus {
    /// Returns a display string for the status.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Online => "Online",
            ConnectionStatus::Degraded => "Degraded",
            ConnectionStatus::Offline => "Offline",
        }
    }
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    pub message: String,
    pub timestamp: Instant,
}
