//! Shared application state for axum handlers.

use std::sync::Arc;

use relayhub_app::ports::{EventPublisher, RelayOutput};
use relayhub_app::request_router::RequestRouter;

/// Application state shared across all axum handlers.
///
/// Generic over the output backend and event publisher to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` is cloned.
pub struct AppState<O, P> {
    /// Request router owning the relay bank.
    pub router: Arc<RequestRouter<O, P>>,
}

impl<O, P> Clone for AppState<O, P> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
        }
    }
}

impl<O, P> AppState<O, P>
where
    O: RelayOutput + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from a router instance.
    pub fn new(router: RequestRouter<O, P>) -> Self {
        Self {
            router: Arc::new(router),
        }
    }
}
