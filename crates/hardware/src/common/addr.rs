//! Physical address type.
//!
//! Trace addresses are byte addresses into the backing memory. Wrapping them in
//! a newtype keeps them from being confused with block indices, set indices, or
//! tags, all of which are plain integers derived from an address.

use std::fmt;

/// A byte address into backing memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Index of the backing-memory block containing this address.
    ///
    /// `block_bytes` must be non-zero; geometry validation guarantees this for
    /// every caller inside the engine.
    #[inline]
    pub const fn block_index(&self, block_bytes: usize) -> u64 {
        self.0 / block_bytes as u64
    }
}

impl From<u64> for PhysAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl fmt::LowerHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Display for PhysAddr {
    /// Renders as `0x` followed by lowercase hex without leading zeros.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
