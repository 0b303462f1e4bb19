//! # relayhub-domain
//!
//! Pure domain model for the relayhub relay controller.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **Relays** (binary output channels addressed by a zero-based index)
//! - Define **Snapshots** (immutable point-in-time copies of every relay state)
//! - Define the **status wire format** consumed by the polling page
//! - Render the **status panel** frame shown on the device display
//! - Define **Events** (relay state-change records)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod event;
pub mod panel;
pub mod relay;
pub mod snapshot;
pub mod status;
