//! Status snapshot — an immutable point-in-time read of every relay.

use crate::relay::{Relay, RelayState};
use crate::time::Timestamp;

/// Immutable copy of all relay states, captured atomically by the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    states: Vec<RelayState>,
    taken_at: Timestamp,
}

impl StatusSnapshot {
    #[must_use]
    pub fn new(states: Vec<RelayState>, taken_at: Timestamp) -> Self {
        Self { states, taken_at }
    }

    /// Number of relays covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State of relay `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<RelayState> {
        self.states.get(index).copied()
    }

    /// All states in ascending index order.
    #[must_use]
    pub fn states(&self) -> &[RelayState] {
        &self.states
    }

    /// Iterate relays in ascending index order.
    pub fn relays(&self) -> impl Iterator<Item = Relay> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(index, &state)| Relay { index, state })
    }

    /// Number of relays currently on.
    #[must_use]
    pub fn on_count(&self) -> usize {
        self.states.iter().filter(|s| s.is_on()).count()
    }

    #[must_use]
    pub fn taken_at(&self) -> Timestamp {
        self.taken_at
    }
}
