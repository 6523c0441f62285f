//! Issues table.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::{badge_style, border_style};
use crate::tui::app::{App, Focus};
use crate::tui::view::{ISSUE_COLUMNS, IssuesTable};

/// Renders the issues table, or its placeholder row.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Issues;
    let block = Block::default()
        .title(" Open Issues ")
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let rows = match &app.issues {
        IssuesTable::Placeholder(text) => {
            // One row spanning every column.
            let para = Paragraph::new(vec![
                Line::from(ISSUE_COLUMNS.join("  ")).style(Style::default().add_modifier(Modifier::BOLD)),
                Line::from(Span::styled(*text, Style::default().fg(Color::Green))),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(para, area);
            return;
        }
        IssuesTable::Rows(rows) => rows,
    };

    let header = Row::new(ISSUE_COLUMNS).style(Style::default().add_modifier(Modifier::BOLD));

    let body = rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.issue_id.to_string()),
            Cell::from(row.issue_type.to_string()),
            Cell::from(row.description.to_string()),
            Cell::from(Span::styled(
                row.severity.label.to_string(),
                badge_style(&row.severity.class),
            )),
            Cell::from(row.trade_id.to_string()),
            Cell::from(Span::styled("[Explain]", Style::default().fg(Color::Cyan))),
        ])
    });

    let widths = [
        Constraint::Length(5),
        Constraint::Length(22),
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default();
    if !rows.is_empty() {
        state.select(Some(app.issue_cursor));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
