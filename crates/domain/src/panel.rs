//! Status panel — the table drawn on the device's small display.
//!
//! A title line, then one cell per relay (filled when on), then the
//! one-based relay labels centred under each cell:
//!
//! ```text
//! Relay Status:
//! +---+---+---+
//! |###|   |###|
//! +---+---+---+
//! | 1 | 2 | 3 |
//! +---+---+---+
//! ```

use std::fmt::Write;

use crate::snapshot::StatusSnapshot;

const TITLE: &str = "Relay Status:";
const FILL: char = '#';

/// A rendered panel frame, one string per display line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelFrame {
    lines: Vec<String>,
}

impl PanelFrame {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl std::fmt::Display for PanelFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Render the panel for `snapshot`.
#[must_use]
pub fn render(snapshot: &StatusSnapshot) -> PanelFrame {
    let label_width = snapshot.len().to_string().len();
    let cell_width = label_width + 2;

    let mut border = String::from("+");
    let mut cells = String::from("|");
    let mut labels = String::from("|");
    for relay in snapshot.relays() {
        border.push_str(&"-".repeat(cell_width));
        border.push('+');

        let fill = if relay.state.is_on() { FILL } else { ' ' };
        cells.extend(std::iter::repeat_n(fill, cell_width));
        cells.push('|');

        // `write!` into a String cannot fail.
        let _ = write!(labels, "{:^cell_width$}|", relay.label());
    }

    PanelFrame {
        lines: vec![
            TITLE.to_string(),
            border.clone(),
            cells,
            border.clone(),
            labels,
            border,
        ],
    }
}
