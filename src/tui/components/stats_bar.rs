//! Summary counters and the reconcile trigger.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, ReconcileState};

/// Renders the three counters followed by the reconcile trigger.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Percentage(34),
        ])
        .split(area);

    let counters = [
        ("Total Trades", app.stats.total_trades, Color::White),
        ("Pending Trades", app.stats.pending_trades, Color::Yellow),
        ("Open Issues", app.stats.total_issues, Color::Red),
    ];

    for (i, (title, value, color)) in counters.iter().enumerate() {
        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let para = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )))
        .block(block);
        frame.render_widget(para, columns[i]);
    }

    let trigger_style = match app.reconcile {
        ReconcileState::Idle => Style::default().fg(Color::Black).bg(Color::Cyan),
        ReconcileState::InFlight => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    };
    let block = Block::default()
        .title(" [c] ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let para = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", app.reconcile.label()),
        trigger_style,
    )))
    .block(block);
    frame.render_widget(para, columns[3]);
}
