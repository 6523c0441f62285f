//! Copilot response region and query input.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::border_style;
use crate::tui::app::{App, Focus, Mode};
use crate::tui::view::CellText;

const PROMPT: &str = "> ";

/// Renders the response region above the query input.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let response = Block::default()
        .title(" Copilot ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let text = CellText::block(&app.response).to_string();
    let para = Paragraph::new(text)
        .block(response)
        .wrap(Wrap { trim: false });
    frame.render_widget(para, layout[0]);

    render_query(frame, layout[1], app);
}

fn render_query(frame: &mut Frame, area: Rect, app: &App) {
    let is_insert = app.mode == Mode::Insert;
    let title = if is_insert {
        " Ask Copilot (INSERT) "
    } else {
        " Ask Copilot "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app.focus == Focus::Query));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = format!("{PROMPT}{}", CellText::line(app.query.as_str()));
    frame.render_widget(Paragraph::new(text), inner);

    if is_insert {
        let cursor_x = inner.x + (PROMPT.len() + app.query.cursor_width()) as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    }
}
