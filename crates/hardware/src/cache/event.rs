//! Structured results of cache accesses.
//!
//! The engine never prints. Each access returns a result carrying the
//! optional replacement that made room for it, and [`Event`] flattens those
//! results into the ordered stream a reporter renders: replacement first,
//! then the access itself.

use std::fmt;

use crate::common::{LineState, Outcome, PhysAddr};

/// A block evicted to make room for a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Replacement {
    /// First byte address of the evicted block.
    pub address: PhysAddr,
    /// Whether it was written back.
    pub state: LineState,
}

/// Result of [`Cache::load`](super::Cache::load).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadResult {
    /// Requested address.
    pub address: PhysAddr,
    /// Hit or miss.
    pub outcome: Outcome,
    /// Bytes read, in address order.
    pub data: Vec<u8>,
    /// Eviction performed before the fill, if any.
    pub replacement: Option<Replacement>,
}

/// Result of [`Cache::store`](super::Cache::store).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreResult {
    /// Requested address.
    pub address: PhysAddr,
    /// Hit or miss.
    pub outcome: Outcome,
    /// Eviction performed before the fill, if any.
    pub replacement: Option<Replacement>,
}

/// One line of simulator output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A block left the cache.
    Replacement(Replacement),
    /// A load completed.
    Load {
        /// Requested address.
        address: PhysAddr,
        /// Hit or miss.
        outcome: Outcome,
        /// Bytes read.
        data: Vec<u8>,
    },
    /// A store completed.
    Store {
        /// Requested address.
        address: PhysAddr,
        /// Hit or miss.
        outcome: Outcome,
    },
}

impl LoadResult {
    /// The replacement (if any) followed by the load event.
    pub fn into_events(self) -> Vec<Event> {
        let mut events: Vec<Event> = self.replacement.map(Event::Replacement).into_iter().collect();
        events.push(Event::Load {
            address: self.address,
            outcome: self.outcome,
            data: self.data,
        });
        events
    }
}

impl StoreResult {
    /// The replacement (if any) followed by the store event.
    pub fn into_events(self) -> Vec<Event> {
        let mut events: Vec<Event> = self.replacement.map(Event::Replacement).into_iter().collect();
        events.push(Event::Store {
            address: self.address,
            outcome: self.outcome,
        });
        events
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "replacement {} {}", self.address, self.state)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replacement(r) => r.fmt(f),
            Self::Load {
                address,
                outcome,
                data,
            } => {
                write!(f, "load {address} {outcome} ")?;
                data.iter().try_for_each(|b| write!(f, "{b:02x}"))
            }
            Self::Store { address, outcome } => write!(f, "store {address} {outcome}"),
        }
    }
}
