//! Trace replay.
//!
//! Provides the [`Simulator`] that connects a trace reader, the cache engine,
//! and a reporter.

/// The replay driver.
pub mod simulator;

pub use self::simulator::Simulator;
