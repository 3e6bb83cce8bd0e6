//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest block in a set, regardless of how recently it
//! was accessed. A set fills its slots in order `0..ways` and never frees one,
//! so once it is full the oldest block always sits at a single round-robin
//! pointer. Each replacement reuses that slot for the newest block and moves
//! the pointer on by one.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `victim()`: O(1)
//!   - `advance()`: O(1)
//! - **Space Complexity:** O(1) per set
//! - **Hardware Cost:** a single `log2(ways)`-bit counter per set

/// FIFO state for one set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FifoPolicy {
    /// Slot holding the oldest resident block once the set is full.
    head: usize,
    /// Number of slots in the set.
    ways: usize,
}

impl FifoPolicy {
    /// Creates the policy for a set with `ways` slots.
    pub const fn new(ways: usize) -> Self {
        Self { head: 0, ways }
    }

    /// The slot to evict next.
    #[inline]
    pub const fn victim(&self) -> usize {
        self.head
    }

    /// Records that the victim slot now holds the newest block.
    #[inline]
    pub const fn advance(&mut self) {
        self.head = (self.head + 1) % self.ways;
    }

    /// Slot indices of a set holding `filled` blocks, oldest first.
    pub fn order(&self, filled: usize) -> impl Iterator<Item = usize> + '_ {
        (0..filled).map(move |i| (self.head + i) % self.ways)
    }
}
