//! Output port — the hardware lines that physically switch the relays.

use std::sync::Arc;

use relayhub_domain::error::RelayHubError;

/// Drives a single output line to a logic level.
///
/// Writes are expected to be fast register or file writes: the bank calls
/// this while holding its state lock, so implementations must not block
/// for long or call back into the bank.
pub trait RelayOutput {
    /// Drive `line` high (`true`) or low (`false`).
    ///
    /// # Errors
    ///
    /// Returns [`RelayHubError::Output`] when the line cannot be driven.
    fn write(&self, line: u32, level: bool) -> Result<(), RelayHubError>;
}

impl<T: RelayOutput + ?Sized> RelayOutput for Arc<T> {
    fn write(&self, line: u32, level: bool) -> Result<(), RelayHubError> {
        (**self).write(line, level)
    }
}
