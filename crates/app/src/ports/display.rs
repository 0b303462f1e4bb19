//! Display port — the status panel on the device.

use std::sync::Arc;

use relayhub_domain::error::RelayHubError;
use relayhub_domain::snapshot::StatusSnapshot;

/// Something that can show the current relay states to a human standing
/// next to the device.
pub trait StatusDisplay {
    /// Redraw the panel for `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayHubError::Output`] when the display cannot be driven.
    fn show(&self, snapshot: &StatusSnapshot) -> Result<(), RelayHubError>;
}

impl<T: StatusDisplay + ?Sized> StatusDisplay for Arc<T> {
    fn show(&self, snapshot: &StatusSnapshot) -> Result<(), RelayHubError> {
        (**self).show(snapshot)
    }
}
