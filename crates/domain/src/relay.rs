//! Relay — a binary output channel addressed by a zero-based index.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BadRequestError;

/// Operational state of a relay. There is no "unknown" state: a relay is
/// driven off at startup and only ever switched between these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayState {
    On,
    #[default]
    Off,
}

impl RelayState {
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Logic level to drive on the output line.
    #[must_use]
    pub fn level(self) -> bool {
        self.is_on()
    }
}

impl From<bool> for RelayState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl From<RelayState> for bool {
    fn from(state: RelayState) -> Self {
        state.is_on()
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// Parses the `state` query parameter. Only the exact lowercase words
/// `on` and `off` are accepted.
impl FromStr for RelayState {
    type Err = BadRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(BadRequestError::InvalidState(other.to_string())),
        }
    }
}

/// A single relay as seen from outside the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relay {
    pub index: usize,
    pub state: RelayState,
}

impl Relay {
    /// Key used for this relay in the status wire format (`relay0`, `relay1`, …).
    #[must_use]
    pub fn wire_key(&self) -> String {
        wire_key(self.index)
    }

    /// One-based label shown to humans (panel cells, page checkboxes).
    #[must_use]
    pub fn label(&self) -> usize {
        self.index + 1
    }
}

/// Zero-indexed status key for relay `index`.
#[must_use]
pub fn wire_key(index: usize) -> String {
    format!("relay{index}")
}
