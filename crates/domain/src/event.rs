//! Event — an immutable record of a relay changing state.

use serde::{Deserialize, Serialize};

use crate::relay::RelayState;
use crate::time::Timestamp;

/// Something that happened to the relay bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelayEvent {
    /// A relay switched from one state to the other.
    RelayChanged {
        index: usize,
        from: RelayState,
        to: RelayState,
        at: Timestamp,
    },
}

impl RelayEvent {
    /// Index of the relay this event concerns.
    #[must_use]
    pub fn relay_index(&self) -> usize {
        match self {
            Self::RelayChanged { index, .. } => *index,
        }
    }
}
