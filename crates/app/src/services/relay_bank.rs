//! Relay bank — the single owner of relay state.
//!
//! The bank holds one state per relay and the hardware line that drives it.
//! Every mutation and every snapshot goes through one mutex, so a snapshot
//! never observes a half-applied `set` and two `set` calls never interleave
//! their line writes.

use std::sync::{Mutex, MutexGuard, PoisonError};

use relayhub_domain::error::{OutOfRangeError, RelayHubError};
use relayhub_domain::event::RelayEvent;
use relayhub_domain::relay::RelayState;
use relayhub_domain::snapshot::StatusSnapshot;
use relayhub_domain::time::now;

use crate::ports::{EventPublisher, RelayOutput};

/// Fixed-size bank of relays, addressed by zero-based index.
pub struct RelayBank<O, P> {
    lines: Vec<u32>,
    states: Mutex<Vec<RelayState>>,
    output: O,
    publisher: P,
}

impl<O: RelayOutput, P: EventPublisher> RelayBank<O, P> {
    /// Create a bank with one relay per entry of `lines`; relay `i` is
    /// driven through `lines[i]`. Every relay starts off. Call
    /// [`initialize`](Self::initialize) to bring the hardware in line.
    pub fn new(lines: Vec<u32>, output: O, publisher: P) -> Self {
        let states = vec![RelayState::Off; lines.len()];
        Self {
            lines,
            states: Mutex::new(states),
            output,
            publisher,
        }
    }

    /// Number of relays in the bank.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Hardware line of every relay, by index.
    #[must_use]
    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    /// Drive every line low and reset every relay to off.
    ///
    /// # Errors
    ///
    /// Returns [`RelayHubError::Output`] from the first line that cannot be
    /// driven; relays before it are already off.
    pub fn initialize(&self) -> Result<(), RelayHubError> {
        let mut states = self.lock();
        for (state, &line) in states.iter_mut().zip(&self.lines) {
            self.output.write(line, RelayState::Off.level())?;
            *state = RelayState::Off;
        }
        tracing::info!(relays = self.len(), "relay bank initialized");
        Ok(())
    }

    /// Switch relay `index` to `state`.
    ///
    /// The line is written even when the relay is already in `state`; no
    /// event is published in that case.
    ///
    /// # Errors
    ///
    /// Returns [`RelayHubError::OutOfRange`] for an unknown index, or
    /// [`RelayHubError::Output`] when the line cannot be driven, in which
    /// case the recorded state is left untouched.
    pub fn set(&self, index: usize, state: RelayState) -> Result<(), RelayHubError> {
        let line = self.line(index)?;
        let previous = {
            let mut states = self.lock();
            self.output.write(line, state.level()).inspect_err(|err| {
                tracing::error!(relay = index, line, error = %err, "failed to drive output line");
            })?;
            std::mem::replace(&mut states[index], state)
        };

        if previous == state {
            tracing::debug!(relay = index, %state, "relay already in requested state");
        } else {
            tracing::info!(relay = index, line, from = %previous, to = %state, "relay changed");
            self.publisher.publish(RelayEvent::RelayChanged {
                index,
                from: previous,
                to: state,
                at: now(),
            });
        }
        Ok(())
    }

    /// Current state of relay `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] for an unknown index.
    pub fn get(&self, index: usize) -> Result<RelayState, OutOfRangeError> {
        self.lock().get(index).copied().ok_or(OutOfRangeError {
            index,
            count: self.len(),
        })
    }

    /// Consistent copy of every relay state.
    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        let states = self.lock().clone();
        StatusSnapshot::new(states, now())
    }

    fn line(&self, index: usize) -> Result<u32, OutOfRangeError> {
        self.lines.get(index).copied().ok_or(OutOfRangeError {
            index,
            count: self.len(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RelayState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::{BOARD_LINES, RecordingOutput, RecordingPublisher, board};

    #[test]
    fn should_start_with_every_relay_off() {
        let (bank, _, _) = board();
        assert_eq!(bank.len(), 7);
        for index in 0..bank.len() {
            assert_eq!(bank.get(index).unwrap(), RelayState::Off);
        }
    }

    #[test]
    fn should_return_state_that_was_set() {
        let (bank, _, _) = board();
        for index in 0..bank.len() {
            for state in [RelayState::On, RelayState::Off, RelayState::On] {
                bank.set(index, state).unwrap();
                assert_eq!(bank.get(index).unwrap(), state);
            }
        }
    }

    #[test]
    fn should_reject_set_outside_bank() {
        let (bank, output, _) = board();
        let result = bank.set(7, RelayState::On);
        assert!(matches!(
            result,
            Err(RelayHubError::OutOfRange(OutOfRangeError { index: 7, count: 7 }))
        ));
        assert!(output.writes().is_empty());
    }

    #[test]
    fn should_reject_get_outside_bank() {
        let (bank, _, _) = board();
        assert_eq!(
            bank.get(usize::MAX),
            Err(OutOfRangeError {
                index: usize::MAX,
                count: 7
            })
        );
    }

    #[test]
    fn should_drive_mapped_line_when_set() {
        let output = Arc::new(RecordingOutput::default());
        let bank = RelayBank::new(
            vec![17, 27, 22],
            output.clone(),
            RecordingPublisher::default(),
        );

        bank.set(1, RelayState::On).unwrap();
        bank.set(1, RelayState::Off).unwrap();

        assert_eq!(output.writes(), vec![(27, true), (27, false)]);
    }

    #[test]
    fn should_expose_line_mapping_in_index_order() {
        let bank = RelayBank::new(
            vec![17, 27, 22],
            RecordingOutput::default(),
            RecordingPublisher::default(),
        );
        assert_eq!(bank.lines(), &[17, 27, 22]);
    }

    #[test]
    fn should_publish_change_event_only_when_state_changes() {
        let (bank, output, publisher) = board();

        bank.set(2, RelayState::On).unwrap();
        bank.set(2, RelayState::On).unwrap();

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            RelayEvent::RelayChanged {
                index: 2,
                from: RelayState::Off,
                to: RelayState::On,
                ..
            }
        ));
        // The repeated set still rewrites the line.
        assert_eq!(output.writes(), vec![(3, true), (3, true)]);
    }

    #[test]
    fn should_keep_state_when_output_line_fails() {
        let bank = RelayBank::new(
            BOARD_LINES.to_vec(),
            RecordingOutput::failing_on(4),
            RecordingPublisher::default(),
        );

        let result = bank.set(3, RelayState::On);

        assert!(matches!(result, Err(RelayHubError::Output(_))));
        assert_eq!(bank.get(3).unwrap(), RelayState::Off);
    }

    #[test]
    fn should_reflect_every_sequential_set_in_snapshot() {
        let (bank, _, _) = board();
        let wanted = [true, false, true, true, false, false, true];
        for (index, &on) in wanted.iter().enumerate() {
            bank.set(index, RelayState::from(on)).unwrap();
        }

        let snapshot = bank.snapshot();

        let got: Vec<bool> = snapshot.relays().map(|r| r.state.is_on()).collect();
        assert_eq!(got, wanted);
        let indices: Vec<usize> = snapshot.relays().map(|r| r.index).collect();
        assert_eq!(indices, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn should_drive_every_line_low_on_initialize() {
        let (bank, output, _) = board();
        bank.set(0, RelayState::On).unwrap();

        bank.initialize().unwrap();

        assert_eq!(bank.get(0).unwrap(), RelayState::Off);
        let writes = output.writes();
        assert_eq!(&writes[1..], &BOARD_LINES.map(|line| (line, false)));
    }

    #[test]
    fn should_never_observe_torn_snapshot_under_concurrent_sets() {
        let (bank, _, _) = board();
        let writer = {
            let bank = Arc::clone(&bank);
            std::thread::spawn(move || {
                for round in 0..200 {
                    let state = RelayState::from(round % 2 == 0);
                    for index in 0..bank.len() {
                        bank.set(index, state).unwrap();
                    }
                }
            })
        };

        for _ in 0..200 {
            let snapshot = bank.snapshot();
            // Relays are written in ascending order, so a snapshot can only
            // ever see a prefix of the bank switched to the newer state.
            let states = snapshot.states();
            let flips = states.windows(2).filter(|w| w[0] != w[1]).count();
            assert!(flips <= 1, "unexpected snapshot {states:?}");
        }
        writer.join().unwrap();
    }
}
