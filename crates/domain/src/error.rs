//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RelayHubError`] via `#[from]`. Adapter-specific failures (hardware
//! output lines) are boxed into [`RelayHubError::Output`].

/// Top-level error for every relayhub operation.
#[derive(Debug, thiserror::Error)]
pub enum RelayHubError {
    #[error("relay index out of range")]
    OutOfRange(#[from] OutOfRangeError),

    #[error("bad request")]
    BadRequest(#[from] BadRequestError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("output error")]
    Output(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to serialize status")]
    Serialize(#[from] serde_json::Error),
}

/// A relay index outside `0..count`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("relay {index} does not exist (bank has {count} relays)")]
pub struct OutOfRangeError {
    pub index: usize,
    pub count: usize,
}

/// Missing or malformed request parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BadRequestError {
    #[error("missing query parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("relay must be a non-negative integer, got `{0}`")]
    InvalidRelay(String),

    #[error("relay {index} does not exist (bank has {count} relays)")]
    RelayOutOfRange { index: usize, count: usize },

    #[error("state must be `on` or `off`, got `{0}`")]
    InvalidState(String),

    #[error("malformed query string")]
    MalformedQuery,
}

/// No route for the requested path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no route for `{path}`")]
pub struct NotFoundError {
    pub path: String,
}

impl RelayHubError {
    /// Whether the caller sent something invalid (as opposed to a device fault).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Output(_) | Self::Serialize(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_out_of_range_into_top_level_error() {
        let err: RelayHubError = OutOfRangeError { index: 9, count: 7 }.into();
        assert!(matches!(
            err,
            RelayHubError::OutOfRange(OutOfRangeError { index: 9, count: 7 })
        ));
    }

    #[test]
    fn should_describe_invalid_state() {
        let err = BadRequestError::InvalidState("maybe".to_string());
        assert_eq!(err.to_string(), "state must be `on` or `off`, got `maybe`");
    }

    #[test]
    fn should_treat_output_failure_as_server_side() {
        let err = RelayHubError::Output("line stuck".into());
        assert!(!err.is_client_error());
        let err: RelayHubError = NotFoundError {
            path: "/nope".to_string(),
        }
        .into();
        assert!(err.is_client_error());
    }
}
