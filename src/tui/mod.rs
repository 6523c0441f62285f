//! Terminal dashboard for the OpsPilot reconciliation service.
//!
//! Provides a Ratatui-based view of trades, open issues and summary
//! counters, a reconcile trigger, and a copilot panel for explanations
//! and free-text questions.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod panels;
pub mod terminal;
pub mod ui;
pub mod view;

pub use app::App;
pub use event::{Action, Event, LoadOutcome, Message};
pub use terminal::{Tui, install_panic_hook, restore_terminal, setup_terminal};
pub use ui::render;
