use std::fs::OpenOptions;
use std::sync::Arc;

use opspilot::config::fetch_config;
use opspilot::gateway::HttpGateway;
use opspilot::lifecycle::Dashboard;
use opspilot::tui::{install_panic_hook, restore_terminal, setup_terminal};
use opspilot::OpsPilotError;

#[tokio::main]
async fn main() -> Result<(), OpsPilotError> {
    let app_config = fetch_config()?;

    // The dashboard owns the terminal, so log output goes to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&app_config.log_file)
        .map_err(|e| {
            OpsPilotError::Io(format!(
                "failed to open log file {}: {e}",
                app_config.log_file.display()
            ))
        })?;
    tracing_subscriber::fmt()
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let gateway = HttpGateway::new(&app_config.api)?;
    tracing::info!(base_url = gateway.base_url(), "using reconciliation service");

    let dashboard = Dashboard::new(Arc::new(gateway), &app_config.ui);

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = dashboard.run(&mut terminal, app_config.ui.tick_ms).await;
    restore_terminal(&mut terminal)?;

    result
}
