//! Simulator: owns the cache and the run statistics side by side.
//!
//! Drivers hand it a [`TraceReader`] and a [`Reporter`]; it replays every
//! record through the cache, renders the resulting events, and counts them.

use std::io::{BufRead, Write};

use crate::cache::{Cache, Event};
use crate::common::{CacheError, ConfigError, SimError};
use crate::config::Config;
use crate::report::Reporter;
use crate::stats::SimStats;
use crate::trace::{TraceReader, TraceRecord};

/// Top-level simulator: cache state plus statistics.
#[derive(Debug)]
pub struct Simulator {
    cache: Cache,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator with an empty cache.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] raised while building the cache.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let cache = Cache::new(config)?;
        let stats = SimStats::new(cache.geometry().block_size());
        Ok(Self { cache, stats })
    }

    /// Applies one record and returns its events in output order.
    ///
    /// # Errors
    ///
    /// The [`CacheError`] the engine raised; nothing is counted in that case.
    pub fn step(&mut self, record: &TraceRecord) -> Result<Vec<Event>, CacheError> {
        let events = match record {
            TraceRecord::Load { address, size } => self.cache.load(*address, *size)?.into_events(),
            TraceRecord::Store { address, payload } => {
                self.cache.store(*address, payload)?.into_events()
            }
        };
        for event in &events {
            self.stats.record(event);
        }
        Ok(events)
    }

    /// Replays `trace` to exhaustion, writing every event to `reporter`.
    ///
    /// Stops at the first error. Events already reported stay reported.
    ///
    /// # Errors
    ///
    /// [`SimError`] for unreadable or malformed trace lines, rejected
    /// accesses, and output failures.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        trace: &mut TraceReader<R>,
        reporter: &mut Reporter<W>,
    ) -> Result<(), SimError> {
        let geometry = self.cache.geometry();
        tracing::info!(
            num_sets = geometry.num_sets(),
            ways = geometry.ways(),
            block_size = geometry.block_size(),
            addressing = ?geometry.addressing(),
            "starting trace replay"
        );

        while let Some(record) = trace.next() {
            let record = record?;
            let events = self.step(&record).map_err(|source| SimError::Access {
                line: trace.line(),
                source,
            })?;
            for event in &events {
                reporter.report(event)?;
            }
        }
        reporter.flush()?;

        tracing::info!(
            accesses = self.stats.accesses(),
            hits = self.stats.hits(),
            misses = self.stats.misses(),
            "trace replay finished"
        );
        Ok(())
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }
}
