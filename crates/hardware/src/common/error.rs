//! Error definitions for the cache simulator.
//!
//! Errors fall into four groups:
//! 1. **Configuration:** geometry or memory sizing that cannot describe a cache.
//! 2. **Access:** a single load or store the engine refuses to perform.
//! 3. **Trace:** an unreadable or malformed trace line.
//! 4. **Simulation:** the union of the above plus output failures, as seen by a driver.
//!
//! Every error is fatal to a run; nothing here is retried.

use std::io;

use thiserror::Error;

use super::addr::PhysAddr;

/// Rejected cache or memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Block (line) size of zero bytes.
    #[error("block size must be non-zero")]
    ZeroBlockSize,

    /// Associativity of zero ways.
    #[error("associativity must be non-zero")]
    ZeroAssociativity,

    /// Cache size in bytes does not fit in `usize`.
    #[error("cache size of {size_kib} KiB is too large")]
    CacheTooLarge {
        /// Requested size in KiB.
        size_kib: usize,
    },

    /// The cache is too small to hold a single set.
    #[error(
        "{cache_bytes}-byte cache cannot hold one set of {ways} x {block_size}-byte blocks"
    )]
    ZeroSets {
        /// Total cache capacity in bytes.
        cache_bytes: usize,
        /// Requested associativity.
        ways: usize,
        /// Requested block size.
        block_size: usize,
    },

    /// Mask addressing was requested for a dimension that is not a power of two.
    #[error("mask addressing requires a power-of-two {what}, got {value}")]
    NotPowerOfTwo {
        /// Which dimension failed (`"block size"` or `"set count"`).
        what: &'static str,
        /// The offending value.
        value: usize,
    },

    /// Backing memory smaller than one block.
    #[error("backing memory of {memory_bytes} bytes cannot hold a {block_size}-byte block")]
    MemoryTooSmall {
        /// Configured memory size in bytes.
        memory_bytes: usize,
        /// Block size in bytes.
        block_size: usize,
    },
}

/// A load or store the engine refused to perform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Zero-length access.
    #[error("zero-length access at {address}")]
    EmptyAccess {
        /// Requested address.
        address: PhysAddr,
    },

    /// The access crosses a block boundary.
    #[error(
        "access of {size} bytes at {address} (offset {offset}) straddles a {block_size}-byte block"
    )]
    Straddle {
        /// Requested address.
        address: PhysAddr,
        /// Requested size in bytes.
        size: usize,
        /// Offset of `address` within its block.
        offset: usize,
        /// Configured block size.
        block_size: usize,
    },

    /// The address maps past the end of backing memory.
    #[error("address {address} maps to block {block_index}, beyond the {block_count}-block backing store")]
    OutOfRange {
        /// Address that was being resolved.
        address: PhysAddr,
        /// Computed block index.
        block_index: u64,
        /// Number of blocks in the backing store.
        block_count: usize,
    },
}

/// Reason a single trace line failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// First field was neither `load` nor `store`.
    #[error("unknown access type `{0}`")]
    UnknownKind(String),

    /// A required field is absent.
    #[error("missing {0}")]
    MissingField(&'static str),

    /// Address not of the form `0x<hex>`.
    #[error("invalid address `{0}`")]
    BadAddress(String),

    /// Size not a positive decimal integer.
    #[error("invalid size `{0}`")]
    BadSize(String),

    /// Payload contains a non-hex character.
    #[error("invalid hex payload `{0}`")]
    BadPayload(String),

    /// Payload length does not match the declared size.
    #[error("payload has {found} hex digits, expected {expected}")]
    PayloadLength {
        /// `size * 2`.
        expected: usize,
        /// Digits actually present.
        found: usize,
    },

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    /// Extra fields after a complete record.
    #[error("unexpected trailing field `{0}`")]
    TrailingField(String),
}

/// Failure while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A line could not be parsed.
    #[error("line {line}: {source}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        source: ParseError,
    },
}

/// Anything that can stop a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Trace input failure.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Engine rejected an access.
    #[error("line {line}: {source}")]
    Access {
        /// 1-based trace line that issued the access.
        line: usize,
        /// Engine error.
        source: CacheError,
    },

    /// Writing the report failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
