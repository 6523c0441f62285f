//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::app::{App, Mode};
use super::components::{notice, stats_bar, status_bar};
use super::panels::{copilot, issues, trades};

/// Renders the entire dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Status bar
            Constraint::Length(3),      // Counters and reconcile trigger
            Constraint::Percentage(40), // Trades
            Constraint::Min(6),         // Issues and copilot
            Constraint::Length(1),      // Keybindings help
        ])
        .split(area);

    status_bar::render(frame, main_layout[0], app);
    stats_bar::render(frame, main_layout[1], app);
    trades::render(frame, main_layout[2], app);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_layout[3]);
    issues::render(frame, lower[0], app);
    copilot::render(frame, lower[1], app);

    render_keybindings(frame, main_layout[4], app);

    if app.mode == Mode::Notice {
        notice::render(frame, app);
    }
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let help = match app.mode {
        Mode::Insert => "[Esc]normal [Enter]ask copilot",
        Mode::Normal => {
            "[r]refresh [c]reconcile [Tab]focus [j/k]select [e]explain issue [/]ask [q]quit"
        }
        Mode::Notice => "[Enter]dismiss",
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
