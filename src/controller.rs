//! Interaction controller.
//!
//! Turns [`Action`]s into gateway calls. Each call runs in its own task and
//! reports back through the event loop's channel, so the loop never waits on
//! the network and concurrent actions do not coordinate: whichever response
//! arrives last for a region is the one on screen.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::gateway::ReconApi;
use crate::tui::{Action, LoadOutcome, Message};

/// Dispatches actions against a [`ReconApi`].
#[derive(Clone)]
pub struct Controller {
    api: Arc<dyn ReconApi>,
    tx: mpsc::UnboundedSender<Message>,
}

impl Controller {
    pub fn new(api: Arc<dyn ReconApi>, tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { api, tx }
    }

    /// Starts the work for `action` and returns immediately.
    pub fn dispatch(&self, action: Action) -> JoinHandle<()> {
        debug!(?action, "dispatching");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            match action {
                Action::Refresh => {
                    let outcome = full_load(api.as_ref()).await;
                    let _ = tx.send(Message::Loaded(outcome));
                }
                Action::Reconcile => reconcile(api.as_ref(), &tx).await,
                Action::Explain { issue_id, token } => {
                    let result = api.explain_issue(issue_id).await;
                    let _ = tx.send(Message::Explanation {
                        token,
                        issue_id,
                        result,
                    });
                }
                Action::Ask { query, token } => {
                    let result = api.ask_question(&query).await;
                    let _ = tx.send(Message::Answer { token, result });
                }
                Action::CheckHealth => {
                    let _ = tx.send(Message::Health(api.health().await));
                }
            }
        })
    }
}

/// Fetches trades and issues once each, concurrently.
///
/// The two results are returned side by side so the tables and the counters
/// are derived from the same snapshot.
pub async fn full_load(api: &dyn ReconApi) -> LoadOutcome {
    let (trades, issues) = tokio::join!(api.list_trades(), api.list_issues());
    LoadOutcome { trades, issues }
}

/// Sends [`Message::ReconcileSettled`] when dropped, so the trigger returns
/// to idle however the reconcile task ends.
struct SettleGuard<'a> {
    tx: &'a mpsc::UnboundedSender<Message>,
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        let _ = self.tx.send(Message::ReconcileSettled);
    }
}

/// Runs reconciliation, reports the result, and reloads on success.
async fn reconcile(api: &dyn ReconApi, tx: &mpsc::UnboundedSender<Message>) {
    let _settle = SettleGuard { tx };

    let result = api.run_reconciliation().await;
    let succeeded = result.is_ok();
    let _ = tx.send(Message::Reconciled(result));

    if succeeded {
        info!("reloading after reconciliation");
        let _ = tx.send(Message::Loaded(full_load(api).await));
    }
}
