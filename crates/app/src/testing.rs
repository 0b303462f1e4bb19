//! In-memory fakes for the ports, shared by the unit tests of this crate.

use std::sync::{Arc, Mutex};

use relayhub_domain::error::RelayHubError;
use relayhub_domain::event::RelayEvent;
use relayhub_domain::snapshot::StatusSnapshot;

use crate::event_bus::InProcessEventBus;
use crate::ports::{EventPublisher, RelayOutput, StatusDisplay};
use crate::services::relay_bank::RelayBank;

/// Line numbers of the reference seven-relay board.
pub const BOARD_LINES: [u32; 7] = [1, 2, 3, 4, 5, 6, 7];

/// Records every line write; optionally fails writes to one line.
#[derive(Default)]
pub struct RecordingOutput {
    writes: Mutex<Vec<(u32, bool)>>,
    broken_line: Option<u32>,
}

impl RecordingOutput {
    pub fn failing_on(line: u32) -> Self {
        Self {
            writes: Mutex::default(),
            broken_line: Some(line),
        }
    }

    pub fn writes(&self) -> Vec<(u32, bool)> {
        self.writes.lock().unwrap().clone()
    }
}

impl RelayOutput for RecordingOutput {
    fn write(&self, line: u32, level: bool) -> Result<(), RelayHubError> {
        if self.broken_line == Some(line) {
            return Err(RelayHubError::Output(
                std::io::Error::other(format!("line {line} stuck")).into(),
            ));
        }
        self.writes.lock().unwrap().push((line, level));
        Ok(())
    }
}

/// Collects published events.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<RelayEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<RelayEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: RelayEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Collects every snapshot it was asked to show.
#[derive(Default)]
pub struct RecordingDisplay {
    shown: Mutex<Vec<StatusSnapshot>>,
}

impl RecordingDisplay {
    pub fn shown(&self) -> Vec<StatusSnapshot> {
        self.shown.lock().unwrap().clone()
    }
}

impl StatusDisplay for RecordingDisplay {
    fn show(&self, snapshot: &StatusSnapshot) -> Result<(), RelayHubError> {
        self.shown.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

pub type TestBank = RelayBank<Arc<RecordingOutput>, Arc<RecordingPublisher>>;

/// Seven-relay bank over recording fakes, with handles to inspect them.
pub fn board() -> (Arc<TestBank>, Arc<RecordingOutput>, Arc<RecordingPublisher>) {
    let output = Arc::new(RecordingOutput::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let bank = RelayBank::new(BOARD_LINES.to_vec(), output.clone(), publisher.clone());
    (Arc::new(bank), output, publisher)
}

/// Seven-relay bank publishing on a real in-process bus.
pub fn board_on_bus(bus: InProcessEventBus) -> Arc<RelayBank<Arc<RecordingOutput>, InProcessEventBus>> {
    Arc::new(RelayBank::new(
        BOARD_LINES.to_vec(),
        Arc::new(RecordingOutput::default()),
        bus,
    ))
}
