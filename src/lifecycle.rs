//! Dashboard lifecycle: wiring, initial load and the event loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::config::UiConfig;
use crate::controller::Controller;
use crate::gateway::ReconApi;
use crate::tui::{self, Action, App, Message, Tui};
use crate::Result;

/// The running dashboard: on-screen state plus the loop that feeds it.
pub struct Dashboard {
    app: App,
    controller: Controller,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl Dashboard {
    /// Wires a dashboard to `api`. Nothing is fetched until [`start`](Self::start).
    pub fn new(api: Arc<dyn ReconApi>, config: &UiConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            app: App::new(config),
            controller: Controller::new(api, tx.clone()),
            tx,
            rx,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Sender feeding the event loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<Message> {
        self.tx.clone()
    }

    /// Probes the service and performs the initial full load.
    pub fn start(&self) {
        info!("starting dashboard");
        self.controller.dispatch(Action::CheckHealth);
        self.controller.dispatch(Action::Refresh);
    }

    /// Applies one message and dispatches whatever action it produces.
    pub fn handle(&mut self, message: Message) {
        if let Some(action) = tui::event::update(&mut self.app, message) {
            self.controller.dispatch(action);
        }
    }

    /// Waits for the next message and applies it.
    ///
    /// Returns `false` once the channel is closed.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(message) => {
                self.handle(message);
                true
            }
            None => false,
        }
    }

    /// Runs the interactive loop on `terminal` until the user quits.
    ///
    /// # Errors
    ///
    /// Returns [`OpsPilotError::Io`](crate::OpsPilotError::Io) if drawing fails.
    pub async fn run(mut self, terminal: &mut Tui, tick_ms: u64) -> Result<()> {
        tui::event::spawn_event_reader(self.tx.clone());
        tui::event::spawn_tick_timer(self.tx.clone(), tick_ms);
        self.start();

        while !self.app.should_quit {
            terminal
                .draw(|frame| tui::render(frame, &self.app))
                .map_err(|e| crate::OpsPilotError::Io(format!("failed to draw: {e}")))?;

            if !self.step().await {
                break;
            }
            // Apply everything already queued before drawing again.
            while let Ok(message) = self.rx.try_recv() {
                self.handle(message);
            }
        }

        info!("dashboard stopped");
        Ok(())
    }
}
