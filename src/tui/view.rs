//! Pure view-model construction.
//!
//! Turns fetched collections into the rows and counters the dashboard draws.
//! Nothing here knows about fetch timing or the terminal; every text field
//! passes through [`CellText`] so remote data can never smuggle terminal
//! control sequences into the screen.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Issue, Trade};

/// Marker shown when an issue has no linked trade.
pub const NO_TRADE_MARKER: &str = "N/A";

/// Text of the placeholder row shown when there are no open issues.
pub const NO_ISSUES_TEXT: &str = "No issues detected ✅";

/// Column headers of the trades table.
pub const TRADE_COLUMNS: [&str; 7] = [
    "Trade ID",
    "Trader",
    "Instrument",
    "Quantity",
    "Price",
    "Side",
    "Status",
];

/// Column headers of the issues table.
pub const ISSUE_COLUMNS: [&str; 6] = ["ID", "Type", "Description", "Severity", "Trade", "Action"];

/// Text that is safe to draw verbatim.
///
/// Control characters are replaced on construction: in single-line cells
/// whitespace controls become a space and everything else becomes U+FFFD.
/// Unicode bidi overrides are treated the same way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellText(String);

impl CellText {
    /// Neutralises `raw` for a single-line table cell.
    pub fn line(raw: &str) -> Self {
        Self(raw.chars().map(|c| neutralize(c, false)).collect())
    }

    /// Neutralises `raw` for a multi-line text region, keeping line breaks.
    pub fn block(raw: &str) -> Self {
        let text = raw.replace("\r\n", "\n");
        Self(text.chars().map(|c| neutralize(c, true)).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CellText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn neutralize(c: char, keep_newlines: bool) -> char {
    match c {
        '\n' if keep_newlines => '\n',
        '\t' | '\n' | '\r' => ' ',
        c if c.is_control() || is_bidi_control(c) => '\u{FFFD}',
        c => c,
    }
}

fn is_bidi_control(c: char) -> bool {
    matches!(c, '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' | '\u{200E}' | '\u{200F}')
}

/// A styled label whose class is derived from the lower-cased value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    /// `badge-<value>`, restricted to `[a-z0-9_-]`.
    pub class: String,
    pub label: CellText,
}

impl Badge {
    pub fn new(value: &str) -> Self {
        let suffix: String = value
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        Self {
            class: format!("badge-{suffix}"),
            label: CellText::line(value),
        }
    }
}

/// One row of the trades table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeRow {
    pub trade_id: CellText,
    pub trader: CellText,
    pub instrument: CellText,
    pub quantity: String,
    /// Price with exactly two decimals and no currency symbol.
    pub price: String,
    pub side: Badge,
    pub status: Badge,
}

impl TradeRow {
    pub fn from_trade(trade: &Trade) -> Self {
        Self {
            trade_id: CellText::line(&trade.trade_id),
            trader: CellText::line(&trade.trader),
            instrument: CellText::line(&trade.instrument),
            quantity: trade.quantity.normalize().to_string(),
            price: format_price(trade.price),
            side: Badge::new(&trade.side),
            status: Badge::new(&trade.status),
        }
    }
}

/// One row of the issues table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueRow {
    /// Id passed to the Explain action for this row.
    pub issue_id: i64,
    pub issue_type: CellText,
    pub description: CellText,
    pub severity: Badge,
    /// Linked trade reference or [`NO_TRADE_MARKER`].
    pub trade_id: CellText,
}

impl IssueRow {
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            issue_id: issue.id,
            issue_type: CellText::line(&issue.issue_type),
            description: CellText::line(&issue.description),
            severity: Badge::new(&issue.severity),
            trade_id: CellText::line(issue.linked_trade().unwrap_or(NO_TRADE_MARKER)),
        }
    }
}

/// Body of the issues table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssuesTable {
    /// Single placeholder row spanning every column.
    Placeholder(&'static str),
    Rows(Vec<IssueRow>),
}

impl IssuesTable {
    pub fn build(issues: &[Issue]) -> Self {
        if issues.is_empty() {
            IssuesTable::Placeholder(NO_ISSUES_TEXT)
        } else {
            IssuesTable::Rows(issues.iter().map(IssueRow::from_issue).collect())
        }
    }

    /// Number of drawn rows, placeholder included.
    pub fn row_count(&self) -> usize {
        match self {
            IssuesTable::Placeholder(_) => 1,
            IssuesTable::Rows(rows) => rows.len(),
        }
    }

    /// Returns the issue rows, empty for the placeholder.
    pub fn rows(&self) -> &[IssueRow] {
        match self {
            IssuesTable::Placeholder(_) => &[],
            IssuesTable::Rows(rows) => rows,
        }
    }
}

impl Default for IssuesTable {
    fn default() -> Self {
        IssuesTable::Rows(Vec::new())
    }
}

/// The three summary counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_trades: usize,
    pub pending_trades: usize,
    pub total_issues: usize,
}

/// Counts trades whose status is exactly `"pending"`.
pub fn pending_count(trades: &[Trade]) -> usize {
    trades.iter().filter(|t| t.is_pending()).count()
}

/// Formats a price with exactly two decimals, rounding half away from zero.
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
