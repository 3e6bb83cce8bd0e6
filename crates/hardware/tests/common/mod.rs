//! Shared test infrastructure.
//!
//! - **Harness**: builds configurations and replays in-memory traces through
//!   a [`Simulator`](cachesim_core::Simulator), capturing the rendered output.

/// Trace replay harness.
pub mod harness;
