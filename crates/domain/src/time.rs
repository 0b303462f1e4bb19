//! Timestamps attached to snapshots and relay events.

use chrono::{DateTime, Utc};

/// UTC instant at which a snapshot was taken or a relay changed.
pub type Timestamp = DateTime<Utc>;

/// Current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
