//! Reusable UI components.

pub mod notice;
pub mod stats_bar;
pub mod status_bar;
