//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, ConnectionStatus};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let status_color = match app.connection_status {
        ConnectionStatus::Online => Color::Green,
        ConnectionStatus::Connecting | ConnectionStatus::Degraded => Color::Yellow,
        ConnectionStatus::Offline => Color::Red,
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let diagnostics = format!(" {} diagnostics ", app.diagnostics.len());

    let line = Line::from(vec![
        Span::styled(" OpsPilot ", Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::styled(
            format!(" {} ", app.connection_status.label()),
            Style::default().fg(status_color),
        ),
        Span::raw("│"),
        error_span,
        Span::raw(format!(
            "{:>width$}",
            diagnostics,
            width = area.width.saturating_sub(40) as usize
        )),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
