//! # relayhub-adapter-virtual
//!
//! Virtual/demo adapter that stands in for the relay board's hardware.
//!
//! ## Provided components
//!
//! | Component | Port | Behaviour |
//! |-----------|------|-----------|
//! | [`SimulatedOutput`] | `RelayOutput` | Keeps line levels in memory and journals every write |
//! | [`LogPanel`] | `StatusDisplay` | Renders the status panel and writes it to the log |
//!
//! ## Dependency rule
//!
//! Depends on `relayhub-app` (port traits) and `relayhub-domain` only.

mod output;
mod panel;

pub use output::SimulatedOutput;
pub use panel::LogPanel;
