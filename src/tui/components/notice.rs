//! Blocking notice popup.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::app::App;
use crate::tui::view::CellText;

/// Renders the oldest pending notice centred over the dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let Some(message) = app.notices.front() else {
        return;
    };

    let area = centered(frame.area(), 50, 9);
    let title = if app.notices.len() > 1 {
        format!(" Notice (1/{}) ", app.notices.len())
    } else {
        " Notice ".to_string()
    };
    let block = Block::default()
        .title(title)
        .title_bottom(" [Enter] dismiss ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let para = Paragraph::new(CellText::block(message).to_string())
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(para, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
