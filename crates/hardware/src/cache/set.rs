//! A single FIFO-ordered cache set.
//!
//! Each set owns a fixed arena: `ways` line slots plus one contiguous
//! `ways * block_size` data region, both allocated at construction. Misses
//! reuse slots instead of allocating, and the [`FifoPolicy`] pointer names the
//! slot to reuse once the set is full.
//!
//! The set never talks to the outside world on its own. The owning
//! [`Cache`](super::Cache) decides and performs write-back before calling
//! [`CacheSet::load`] or [`CacheSet::store`], which only read from the backing
//! store.

use super::fifo::FifoPolicy;
use crate::common::{CacheError, Outcome};
use crate::memory::BackingStore;

/// Cache line metadata. Data lives in the set's arena at `slot * block_size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct CacheLine {
    tag: u64,
    valid: bool,
    dirty: bool,
}

/// Read-only view of the block a set would evict next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Victim<'a> {
    /// Tag of the victim block.
    pub tag: u64,
    /// Whether it differs from backing memory.
    pub dirty: bool,
    /// Its full contents.
    pub data: &'a [u8],
}

/// One associative bucket of up to `ways` resident blocks.
#[derive(Clone, Debug)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
    data: Vec<u8>,
    block_size: usize,
    ways: usize,
    filled: usize,
    fifo: FifoPolicy,
}

impl CacheSet {
    /// Creates an empty set.
    pub fn new(ways: usize, block_size: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
            data: vec![0; ways * block_size],
            block_size,
            ways,
            filled: 0,
            fifo: FifoPolicy::new(ways),
        }
    }

    /// Maximum number of resident blocks.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of resident blocks.
    pub const fn len(&self) -> usize {
        self.filled
    }

    /// Returns `true` if no block has been filled yet.
    pub const fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Returns `true` once every slot holds a block.
    pub const fn is_full(&self) -> bool {
        self.filled == self.ways
    }

    /// Looks `tag` up without changing anything.
    pub fn probe(&self, tag: u64) -> Outcome {
        if self.find(tag).is_some() {
            Outcome::Hit
        } else {
            Outcome::Miss
        }
    }

    /// Returns `true` if accessing `tag` now would evict a block.
    pub fn will_evict(&self, tag: u64) -> bool {
        self.is_full() && self.find(tag).is_none()
    }

    /// The block that the next miss would evict, or `None` while slots remain.
    pub fn victim(&self) -> Option<Victim<'_>> {
        if !self.is_full() {
            return None;
        }
        let slot = self.fifo.victim();
        let line = &self.lines[slot];
        Some(Victim {
            tag: line.tag,
            dirty: line.dirty,
            data: self.block(slot),
        })
    }

    /// Reads `size` bytes at `offset` of block `tag`, filling it on a miss.
    ///
    /// On a miss the block is read from `backing[block_index]`, installed clean
    /// at the FIFO tail, and the FIFO head is dropped if the set was full. The
    /// caller must already have written that head back if it was dirty.
    ///
    /// # Errors
    ///
    /// [`CacheError::OutOfRange`] if `block_index` is not backed; the set is
    /// left unchanged.
    pub fn load(
        &mut self,
        tag: u64,
        offset: usize,
        size: usize,
        backing: &BackingStore,
        block_index: usize,
    ) -> Result<(Outcome, &[u8]), CacheError> {
        debug_assert!(offset + size <= self.block_size, "access straddles block");
        let (outcome, slot) = match self.find(tag) {
            Some(slot) => (Outcome::Hit, slot),
            None => {
                let fill = backing.read_block(block_index)?;
                (Outcome::Miss, self.install(tag, fill, false))
            }
        };
        Ok((outcome, &self.block(slot)[offset..offset + size]))
    }

    /// Writes `payload` at `offset` of block `tag`, marking it dirty.
    ///
    /// A miss allocates: the block is first filled from `backing[block_index]`,
    /// then the payload is applied, and the block is dirty from the start.
    ///
    /// # Errors
    ///
    /// [`CacheError::OutOfRange`] if `block_index` is not backed; the set is
    /// left unchanged.
    pub fn store(
        &mut self,
        tag: u64,
        offset: usize,
        payload: &[u8],
        backing: &BackingStore,
        block_index: usize,
    ) -> Result<Outcome, CacheError> {
        debug_assert!(offset + payload.len() <= self.block_size, "access straddles block");
        let (outcome, slot) = match self.find(tag) {
            Some(slot) => (Outcome::Hit, slot),
            None => {
                let fill = backing.read_block(block_index)?;
                (Outcome::Miss, self.install(tag, fill, true))
            }
        };
        self.lines[slot].dirty = true;
        self.block_mut(slot)[offset..offset + payload.len()].copy_from_slice(payload);
        Ok(outcome)
    }

    /// Resident tags, oldest (next victim) first.
    pub fn resident_tags(&self) -> Vec<u64> {
        self.fifo
            .order(self.filled)
            .map(|slot| self.lines[slot].tag)
            .collect()
    }

    /// Dirty bit of block `tag`, or `None` if it is not resident.
    pub fn is_dirty(&self, tag: u64) -> Option<bool> {
        self.find(tag).map(|slot| self.lines[slot].dirty)
    }

    /// Contents of block `tag`, or `None` if it is not resident.
    pub fn block_data(&self, tag: u64) -> Option<&[u8]> {
        self.find(tag).map(|slot| self.block(slot))
    }

    fn find(&self, tag: u64) -> Option<usize> {
        self.lines[..]
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Places a freshly filled block at the FIFO tail and returns its slot.
    fn install(&mut self, tag: u64, fill: &[u8], dirty: bool) -> usize {
        let slot = if self.is_full() {
            let slot = self.fifo.victim();
            self.fifo.advance();
            slot
        } else {
            self.filled += 1;
            self.filled - 1
        };
        self.lines[slot] = CacheLine {
            tag,
            valid: true,
            dirty,
        };
        self.block_mut(slot).copy_from_slice(fill);
        slot
    }

    fn block(&self, slot: usize) -> &[u8] {
        let start = slot * self.block_size;
        &self.data[start..start + self.block_size]
    }

    fn block_mut(&mut self, slot: usize) -> &mut [u8] {
        let start = slot * self.block_size;
        &mut self.data[start..start + self.block_size]
    }
}
