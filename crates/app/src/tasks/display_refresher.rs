//! Display refresher — redraws the status panel whenever a relay changes.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;

use relayhub_domain::event::RelayEvent;

use crate::ports::{EventPublisher, RelayOutput, StatusDisplay};
use crate::services::relay_bank::RelayBank;

/// Keeps a [`StatusDisplay`] in sync with the relay bank.
pub struct DisplayRefresher<O, P, D> {
    bank: Arc<RelayBank<O, P>>,
    display: D,
}

impl<O, P, D> DisplayRefresher<O, P, D>
where
    O: RelayOutput,
    P: EventPublisher,
    D: StatusDisplay,
{
    pub fn new(bank: Arc<RelayBank<O, P>>, display: D) -> Self {
        Self { bank, display }
    }

    /// Draw once, then redraw after every received event until `cancel`
    /// fires or the event bus closes.
    ///
    /// Redraws always use a fresh snapshot, so a lagging receiver simply
    /// redraws once for all the events it missed.
    pub async fn run(self, mut events: broadcast::Receiver<RelayEvent>, cancel: CancellationToken) {
        self.redraw();
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                received = events.recv() => match received {
                    Ok(_) => self.redraw(),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "display refresher lagged behind relay events");
                        self.redraw();
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
        tracing::debug!("display refresher stopped");
    }

    fn redraw(&self) {
        let snapshot = self.bank.snapshot();
        if let Err(err) = self.display.show(&snapshot) {
            tracing::warn!(error = %err, "failed to refresh status display");
        }
    }
}
