//! Trades table.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use super::{badge_style, border_style};
use crate::tui::app::{App, Focus};
use crate::tui::view::TRADE_COLUMNS;

/// Renders the trades table.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Trades;
    let block = Block::default()
        .title(" Trades ")
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let header = Row::new(TRADE_COLUMNS).style(Style::default().add_modifier(Modifier::BOLD));

    let rows = app.trade_rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.trade_id.to_string()),
            Cell::from(row.trader.to_string()),
            Cell::from(row.instrument.to_string()),
            Cell::from(row.quantity.clone()),
            Cell::from(format!("${}", row.price)),
            Cell::from(Span::styled(
                row.side.label.to_string(),
                badge_style(&row.side.class),
            )),
            Cell::from(Span::styled(
                row.status.label.to_string(),
                badge_style(&row.status.class),
            )),
        ])
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    if focused && !app.trade_rows.is_empty() {
        state.select(Some(app.trade_cursor));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
