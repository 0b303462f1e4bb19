//! Status wire format served on `GET /status`.
//!
//! The body is a flat JSON object mapping `relay{i}` to a boolean, with
//! keys written in ascending numeric index order so that identical
//! snapshots always serialize to identical bytes (`relay2` precedes
//! `relay10`, which a lexicographically sorted map would not guarantee).
//!
//! Keys are zero-indexed. The polling page binds checkbox `relay{i+1}` to
//! key `relay{i}`; that offset lives in the page and must not leak here.

use std::collections::HashMap;

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::relay::{RelayState, wire_key};
use crate::snapshot::StatusSnapshot;

/// Content type of the serialized status body.
pub const CONTENT_TYPE: &str = "application/json";

/// Borrowing serializer view over a [`StatusSnapshot`].
pub struct StatusBody<'a>(&'a StatusSnapshot);

impl<'a> StatusBody<'a> {
    #[must_use]
    pub fn new(snapshot: &'a StatusSnapshot) -> Self {
        Self(snapshot)
    }
}

impl Serialize for StatusBody<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for relay in self.0.relays() {
            map.serialize_entry(&relay.wire_key(), &relay.state.is_on())?;
        }
        map.end()
    }
}

/// Serialize a snapshot into the status body.
///
/// # Errors
///
/// Propagates [`serde_json::Error`]; a map of string keys to booleans
/// cannot fail in practice.
pub fn serialize(snapshot: &StatusSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StatusBody::new(snapshot))
}

/// Errors raised while reading a status body back.
#[derive(Debug, thiserror::Error)]
pub enum ParseStatusError {
    #[error("status body is not a JSON object of booleans")]
    Json(#[from] serde_json::Error),

    #[error("status body is missing key `{0}`")]
    MissingKey(String),

    #[error("status body has unexpected key `{0}`")]
    UnexpectedKey(String),
}

/// Parse a status body back into relay states, ordered by index.
///
/// # Errors
///
/// Returns [`ParseStatusError`] if the body is not an object of booleans,
/// or if its keys are not exactly `relay0..relay{N-1}`.
pub fn parse(body: &str) -> Result<Vec<RelayState>, ParseStatusError> {
    let mut entries: HashMap<String, bool> = serde_json::from_str(body)?;
    let count = entries.len();
    let mut states = Vec::with_capacity(count);
    for index in 0..count {
        let key = wire_key(index);
        let on = entries
            .remove(&key)
            .ok_or_else(|| ParseStatusError::MissingKey(key))?;
        states.push(RelayState::from(on));
    }
    if let Some(key) = entries.into_keys().next() {
        return Err(ParseStatusError::UnexpectedKey(key));
    }
    Ok(states)
}
