//! # relayhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the two endpoints used by the polling page
//!   (`GET /relay?relay=<i>&state=on|off`, `GET /status`) plus `GET /health`
//! - Optionally serve the page itself (`index.html`, `script.js`) from a
//!   static assets directory
//! - Map HTTP requests into [`RequestRouter`](relayhub_app::request_router::RequestRouter)
//!   calls (driving adapter) and router results into HTTP responses
//!
//! Path matching and parameter validation live in the request router, not
//! in axum routes: every request that is not `/health` or a static file is
//! handed to the router as a path plus decoded query parameters.
//!
//! ## Dependency rule
//! Depends on `relayhub-app` (for port traits and the router) and
//! `relayhub-domain` (for error mapping). Never leaks axum types into the
//! domain.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
