//! Log-backed status panel.

use std::sync::{Mutex, PoisonError};

use relayhub_app::ports::StatusDisplay;
use relayhub_domain::error::RelayHubError;
use relayhub_domain::panel::{self, PanelFrame};
use relayhub_domain::snapshot::StatusSnapshot;

/// Renders the status panel and writes each frame to the log at `info`
/// level, one record per frame. The last frame is kept for inspection.
#[derive(Default)]
pub struct LogPanel {
    last: Mutex<Option<PanelFrame>>,
}

impl LogPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently drawn frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<PanelFrame> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StatusDisplay for LogPanel {
    fn show(&self, snapshot: &StatusSnapshot) -> Result<(), RelayHubError> {
        let frame = panel::render(snapshot);
        tracing::info!(
            on = snapshot.on_count(),
            taken_at = %snapshot.taken_at(),
            "status panel\n{frame}"
        );
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(frame);
        Ok(())
    }
}
