//! Simulated output lines — the fake hardware backend.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use relayhub_app::ports::RelayOutput;
use relayhub_domain::error::RelayHubError;

#[derive(Default)]
struct Lines {
    levels: BTreeMap<u32, bool>,
    journal: Vec<(u32, bool)>,
}

/// In-memory output lines. Every line reads low until written.
#[derive(Default)]
pub struct SimulatedOutput {
    lines: Mutex<Lines>,
}

impl SimulatedOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of `line`.
    #[must_use]
    pub fn level(&self, line: u32) -> bool {
        self.lock().levels.get(&line).copied().unwrap_or(false)
    }

    /// Every write so far, oldest first.
    #[must_use]
    pub fn journal(&self) -> Vec<(u32, bool)> {
        self.lock().journal.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Lines> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RelayOutput for SimulatedOutput {
    fn write(&self, line: u32, level: bool) -> Result<(), RelayHubError> {
        let mut lines = self.lock();
        lines.levels.insert(line, level);
        lines.journal.push((line, level));
        tracing::trace!(line, level, "simulated line written");
        Ok(())
    }
}
