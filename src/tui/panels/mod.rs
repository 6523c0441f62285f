//! Dashboard panels.

pub mod copilot;
pub mod issues;
pub mod trades;

use ratatui::style::{Color, Modifier, Style};

/// Maps a badge class to its colour.
pub fn badge_style(class: &str) -> Style {
    let color = match class {
        "badge-buy" | "badge-settled" | "badge-low" => Color::Green,
        "badge-sell" | "badge-high" | "badge-failed" => Color::Red,
        "badge-pending" | "badge-medium" => Color::Yellow,
        "badge-critical" => Color::Magenta,
        _ => Color::Gray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Border style for a panel depending on focus.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
