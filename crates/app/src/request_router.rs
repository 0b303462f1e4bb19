//! Request router — maps a parsed request onto the relay bank.
//!
//! The router knows nothing about HTTP: the transport hands it a path and
//! the decoded query parameters, and turns the result back into a response.
//! The two routes and their parameter names are fixed by the polling page:
//!
//! | Path | Parameters | Effect |
//! |------|------------|--------|
//! | `/relay` | `relay=<index>`, `state=on\|off` | switch one relay |
//! | `/status` | — | JSON object `relay0..relay{N-1}` → bool |

use std::sync::Arc;

use relayhub_domain::error::{BadRequestError, NotFoundError, RelayHubError};
use relayhub_domain::relay::RelayState;
use relayhub_domain::status;

use crate::ports::{EventPublisher, RelayOutput};
use crate::services::relay_bank::RelayBank;

pub const RELAY_PATH: &str = "/relay";
pub const STATUS_PATH: &str = "/status";

/// A request as seen by the router: path plus decoded query parameters in
/// the order they appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    path: String,
    params: Vec<(String, String)>,
}

impl RouteRequest {
    pub fn new(path: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            params,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value of query parameter `name`, if present.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Successful outcome of a routed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResponse {
    /// The command was applied; no body.
    Acknowledged,
    /// A body to return verbatim.
    Body {
        content_type: &'static str,
        body: String,
    },
}

/// Dispatches requests to the relay bank it was built with.
pub struct RequestRouter<O, P> {
    bank: Arc<RelayBank<O, P>>,
}

impl<O: RelayOutput, P: EventPublisher> RequestRouter<O, P> {
    pub fn new(bank: Arc<RelayBank<O, P>>) -> Self {
        Self { bank }
    }

    /// The bank this router drives.
    #[must_use]
    pub fn bank(&self) -> &Arc<RelayBank<O, P>> {
        &self.bank
    }

    /// Route a single request.
    ///
    /// # Errors
    ///
    /// - [`RelayHubError::BadRequest`] for missing or malformed `/relay`
    ///   parameters (the bank is left untouched),
    /// - [`RelayHubError::NotFound`] for any other path,
    /// - [`RelayHubError::Output`] when the relay line cannot be driven.
    pub fn handle(&self, request: &RouteRequest) -> Result<RouteResponse, RelayHubError> {
        match request.path() {
            RELAY_PATH => self.switch_relay(request),
            STATUS_PATH => self.status(),
            other => Err(NotFoundError {
                path: other.to_string(),
            }
            .into()),
        }
    }

    fn switch_relay(&self, request: &RouteRequest) -> Result<RouteResponse, RelayHubError> {
        let (index, state) = self.parse_command(request)?;
        self.bank.set(index, state)?;
        Ok(RouteResponse::Acknowledged)
    }

    fn status(&self) -> Result<RouteResponse, RelayHubError> {
        let snapshot = self.bank.snapshot();
        let body = status::serialize(&snapshot)?;
        Ok(RouteResponse::Body {
            content_type: status::CONTENT_TYPE,
            body,
        })
    }

    fn parse_command(&self, request: &RouteRequest) -> Result<(usize, RelayState), BadRequestError> {
        let raw_relay = request
            .param("relay")
            .ok_or(BadRequestError::MissingParameter("relay"))?;
        let raw_state = request
            .param("state")
            .ok_or(BadRequestError::MissingParameter("state"))?;

        let index: usize = raw_relay
            .parse()
            .map_err(|_| BadRequestError::InvalidRelay(raw_relay.to_string()))?;
        if index >= self.bank.len() {
            return Err(BadRequestError::RelayOutOfRange {
                index,
                count: self.bank.len(),
            });
        }
        let state: RelayState = raw_state.parse()?;

        Ok((index, state))
    }
}
