//! Pulse sequence — walks a list of relays, pulsing each one in turn.
//!
//! Used to exercise the outputs after installation: every relay in the
//! sequence is switched on for `on_time`, then off for `off_time`, and the
//! walk repeats until cancelled. Switching goes through the bank, so the
//! pulses are visible on `/status` and on the panel.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use relayhub_domain::error::{OutOfRangeError, RelayHubError};
use relayhub_domain::relay::RelayState;

use crate::ports::{EventPublisher, RelayOutput};
use crate::services::relay_bank::RelayBank;

/// Timing and membership of a pulse walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseSequence {
    relays: Vec<usize>,
    on_time: Duration,
    off_time: Duration,
}

impl PulseSequence {
    #[must_use]
    pub fn new(relays: Vec<usize>, on_time: Duration, off_time: Duration) -> Self {
        Self {
            relays,
            on_time,
            off_time,
        }
    }

    /// Run the walk against `bank` until `cancel` fires. A relay that is on
    /// when cancellation arrives is switched off before returning.
    ///
    /// # Errors
    ///
    /// Returns [`RelayHubError::OutOfRange`] up front if a relay of the
    /// sequence is not in the bank, or the first error raised by the bank
    /// while switching.
    pub async fn run<O, P>(
        self,
        bank: Arc<RelayBank<O, P>>,
        cancel: CancellationToken,
    ) -> Result<(), RelayHubError>
    where
        O: RelayOutput,
        P: EventPublisher,
    {
        if let Some(&index) = self.relays.iter().find(|&&index| index >= bank.len()) {
            return Err(OutOfRangeError {
                index,
                count: bank.len(),
            }
            .into());
        }
        if self.relays.is_empty() {
            cancel.cancelled().await;
            return Ok(());
        }

        tracing::info!(relays = ?self.relays, "pulse sequence started");
        for &index in self.relays.iter().cycle() {
            bank.set(index, RelayState::On)?;
            let interrupted = sleep_or_cancel(self.on_time, &cancel).await;
            bank.set(index, RelayState::Off)?;
            if interrupted || sleep_or_cancel(self.off_time, &cancel).await {
                break;
            }
        }
        tracing::info!("pulse sequence stopped");
        Ok(())
    }
}

/// Sleep for `duration`; returns `true` when cancelled first.
async fn sleep_or_cancel(duration: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        () = cancel.cancelled() => true,
        () = tokio::time::sleep(duration) => false,
    }
}
