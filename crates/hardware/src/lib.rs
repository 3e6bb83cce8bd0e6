//! Trace-driven set-associative cache simulator library.
//!
//! This crate replays load/store traces against a write-back, write-allocate
//! cache with FIFO replacement and reports what happened:
//! 1. **Cache:** address decomposition, sets, FIFO eviction, and write-back.
//! 2. **Memory:** the zero-initialized backing store behind the cache.
//! 3. **Trace:** a strict parser and a lazy reader for trace files.
//! 4. **Reporting:** structured events rendered as text, plus run statistics.
//! 5. **Simulation:** configuration and the replay driver that ties it together.

/// Cache engine (geometry, sets, FIFO policy, events).
pub mod cache;
/// Common types (addresses, access kinds, errors).
pub mod common;
/// Simulator configuration (defaults, cache geometry, memory size).
pub mod config;
/// Backing memory.
pub mod memory;
/// Event rendering.
pub mod report;
/// Trace replay driver.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;
/// Trace file parsing.
pub mod trace;

/// The cache engine; construct with `Cache::new`.
pub use crate::cache::Cache;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Replay driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
