//! # relayhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RelayOutput` — drive one hardware output line
//!   - `StatusDisplay` — show the status panel
//!   - `EventPublisher` — publish relay events
//! - Own the relay state: `RelayBank` (the only writer of relay state)
//! - Define the **driving/inbound port**: `RequestRouter` maps a parsed
//!   request (path + query parameters) onto the bank
//! - Provide **in-process infrastructure** (event bus, background tasks)
//!   that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `relayhub-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod request_router;
pub mod services;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;
