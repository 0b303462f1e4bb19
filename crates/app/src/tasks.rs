//! Long-running background tasks.
//!
//! Each task runs until its [`CancellationToken`](tokio_util::sync::CancellationToken)
//! is cancelled; the daemon cancels one shared token on shutdown.

pub mod display_refresher;
pub mod pulse_sequence;

pub use display_refresher::DisplayRefresher;
pub use pulse_sequence::PulseSequence;
