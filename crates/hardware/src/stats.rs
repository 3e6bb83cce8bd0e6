//! Simulation statistics collection and reporting.
//!
//! This module tracks aggregate counts for a trace replay:
//! 1. **Accesses:** loads and stores, each split into hits and misses.
//! 2. **Evictions:** clean and dirty replacements, and the bytes written back.
//!
//! Counts are derived from the [`Event`] stream, so they always agree with the
//! printed output.

use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;

use crate::cache::Event;
use crate::common::{LineState, Outcome};

/// Aggregate counts for one simulation run.
///
/// Serializes as its [`StatsSummary`], so JSON output carries the derived
/// totals and rates alongside the raw counters.
#[derive(Clone, Debug, Serialize)]
#[serde(into = "StatsSummary")]
pub struct SimStats {
    start_time: Instant,
    /// Block size used to convert dirty evictions into bytes.
    pub block_size: usize,

    /// Load accesses that found their block resident.
    pub load_hits: u64,
    /// Load accesses that filled from backing memory.
    pub load_misses: u64,
    /// Store accesses that found their block resident.
    pub store_hits: u64,
    /// Store accesses that filled from backing memory.
    pub store_misses: u64,

    /// Evictions of unmodified blocks.
    pub clean_evictions: u64,
    /// Evictions that wrote a block back.
    pub dirty_evictions: u64,
}

impl SimStats {
    /// Creates zeroed statistics for a cache with `block_size`-byte blocks.
    pub fn new(block_size: usize) -> Self {
        Self {
            start_time: Instant::now(),
            block_size,
            load_hits: 0,
            load_misses: 0,
            store_hits: 0,
            store_misses: 0,
            clean_evictions: 0,
            dirty_evictions: 0,
        }
    }

    /// Counts one output event.
    pub fn record(&mut self, event: &Event) {
        match event {
            Event::Replacement(r) => match r.state {
                LineState::Clean => self.clean_evictions += 1,
                LineState::Dirty => self.dirty_evictions += 1,
            },
            Event::Load { outcome, .. } => match outcome {
                Outcome::Hit => self.load_hits += 1,
                Outcome::Miss => self.load_misses += 1,
            },
            Event::Store { outcome, .. } => match outcome {
                Outcome::Hit => self.store_hits += 1,
                Outcome::Miss => self.store_misses += 1,
            },
        }
    }

    /// Total loads.
    pub const fn loads(&self) -> u64 {
        self.load_hits + self.load_misses
    }

    /// Total stores.
    pub const fn stores(&self) -> u64 {
        self.store_hits + self.store_misses
    }

    /// Total accesses.
    pub const fn accesses(&self) -> u64 {
        self.loads() + self.stores()
    }

    /// Total hits.
    pub const fn hits(&self) -> u64 {
        self.load_hits + self.store_hits
    }

    /// Total misses.
    pub const fn misses(&self) -> u64 {
        self.load_misses + self.store_misses
    }

    /// Bytes copied to backing memory by dirty evictions.
    pub const fn writeback_bytes(&self) -> u64 {
        self.dirty_evictions * self.block_size as u64
    }

    /// Raw counters plus every derived figure.
    pub const fn summary(&self) -> StatsSummary {
        StatsSummary {
            block_size: self.block_size,
            accesses: self.accesses(),
            loads: self.loads(),
            stores: self.stores(),
            hits: self.hits(),
            misses: self.misses(),
            hit_rate: self.hit_rate(),
            load_hits: self.load_hits,
            load_misses: self.load_misses,
            store_hits: self.store_hits,
            store_misses: self.store_misses,
            clean_evictions: self.clean_evictions,
            dirty_evictions: self.dirty_evictions,
            writeback_bytes: self.writeback_bytes(),
        }
    }

    /// Fraction of accesses that hit, or 0 for an empty trace.
    pub const fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }

    /// Writes a human-readable summary.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let pct = |n: u64, d: u64| {
            if d == 0 {
                0.0
            } else {
                (n as f64 / d as f64) * 100.0
            }
        };

        writeln!(out, "==========================================================")?;
        writeln!(out, "CACHE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "host_seconds             {seconds:.4} s")?;
        writeln!(out, "accesses                 {}", self.accesses())?;
        writeln!(out, "hit_rate                 {:.2}%", self.hit_rate() * 100.0)?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(
            out,
            "  load.hits              {} ({:.2}%)",
            self.load_hits,
            pct(self.load_hits, self.loads())
        )?;
        writeln!(out, "  load.misses            {}", self.load_misses)?;
        writeln!(
            out,
            "  store.hits             {} ({:.2}%)",
            self.store_hits,
            pct(self.store_hits, self.stores())
        )?;
        writeln!(out, "  store.misses           {}", self.store_misses)?;
        writeln!(out, "  evict.clean            {}", self.clean_evictions)?;
        writeln!(out, "  evict.dirty            {}", self.dirty_evictions)?;
        writeln!(out, "  writeback.bytes        {}", self.writeback_bytes())?;
        writeln!(out, "==========================================================")
    }
}

/// Serializable snapshot of [`SimStats`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatsSummary {
    /// Block size in bytes.
    pub block_size: usize,
    /// Total accesses.
    pub accesses: u64,
    /// Total loads.
    pub loads: u64,
    /// Total stores.
    pub stores: u64,
    /// Total hits.
    pub hits: u64,
    /// Total misses.
    pub misses: u64,
    /// Fraction of accesses that hit.
    pub hit_rate: f64,
    /// Load hits.
    pub load_hits: u64,
    /// Load misses.
    pub load_misses: u64,
    /// Store hits.
    pub store_hits: u64,
    /// Store misses.
    pub store_misses: u64,
    /// Clean evictions.
    pub clean_evictions: u64,
    /// Dirty evictions.
    pub dirty_evictions: u64,
    /// Bytes written back by dirty evictions.
    pub writeback_bytes: u64,
}

impl From<SimStats> for StatsSummary {
    fn from(stats: SimStats) -> Self {
        stats.summary()
    }
}
