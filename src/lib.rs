//! OpsPilot dashboard client.
//!
//! A terminal dashboard for the OpsPilot trade reconciliation service:
//! it lists trades and open issues, triggers reconciliation runs, and
//! relays questions to the service's copilot endpoints.

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod lifecycle;
pub mod models;
pub mod tls;
pub mod tui;

pub use error::{OpsPilotError, Result};
