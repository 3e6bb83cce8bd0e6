//! Set-Associative Cache Engine.
//!
//! This module implements a write-back, write-allocate, set-associative cache
//! with FIFO replacement in front of a [`BackingStore`]. It models:
//! 1. **Addressing:** splitting byte addresses into set, tag, and offset ([`Geometry`]).
//! 2. **Sets:** per-set hit/miss resolution, fills, and FIFO eviction ([`CacheSet`]).
//! 3. **Write-back:** copying dirty victims to backing memory before their slot is reused.
//! 4. **Events:** structured results describing what each access did ([`Event`]).

/// Structured access results and output events.
pub mod event;

/// FIFO replacement pointer.
pub mod fifo;

/// Address decomposition.
pub mod geometry;

/// A single cache set.
pub mod set;

pub use self::event::{Event, LoadResult, Replacement, StoreResult};
pub use self::geometry::{Decomposed, Geometry};
pub use self::set::CacheSet;

use crate::common::{CacheError, ConfigError, LineState, PhysAddr};
use crate::config::Config;
use crate::memory::BackingStore;

/// A set-associative cache that owns its backing memory.
///
/// Every access runs to completion: any eviction write-back happens before the
/// set is modified, and the replacement is returned ahead of the access result.
#[derive(Debug)]
pub struct Cache {
    geometry: Geometry,
    sets: Vec<CacheSet>,
    backing: BackingStore,
}

impl Cache {
    /// Creates an empty cache over zeroed backing memory.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from geometry or memory validation.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let geometry = Geometry::new(&config.cache)?;
        let backing = BackingStore::new(&config.memory, geometry.block_size())?;
        let sets = (0..geometry.num_sets())
            .map(|_| CacheSet::new(geometry.ways(), geometry.block_size()))
            .collect();

        tracing::debug!(
            num_sets = geometry.num_sets(),
            ways = geometry.ways(),
            block_size = geometry.block_size(),
            memory_blocks = backing.block_count(),
            "cache constructed"
        );

        Ok(Self {
            geometry,
            sets,
            backing,
        })
    }

    /// Reads `size` bytes at `address`.
    ///
    /// # Errors
    ///
    /// [`CacheError`] if the access is empty, straddles a block, or lies
    /// outside backing memory. A rejected access changes nothing.
    pub fn load(&mut self, address: PhysAddr, size: usize) -> Result<LoadResult, CacheError> {
        let (d, block_index) = self.check(address, size)?;
        let replacement = self.make_room(d.set, d.tag)?;

        let (outcome, data) =
            self.sets[d.set].load(d.tag, d.offset, size, &self.backing, block_index)?;
        tracing::trace!(%address, size, ?outcome, "load");

        Ok(LoadResult {
            address,
            outcome,
            data: data.to_vec(),
            replacement,
        })
    }

    /// Writes `payload` at `address`.
    ///
    /// # Errors
    ///
    /// [`CacheError`] if the payload is empty, straddles a block, or lies
    /// outside backing memory. A rejected access changes nothing.
    pub fn store(&mut self, address: PhysAddr, payload: &[u8]) -> Result<StoreResult, CacheError> {
        let (d, block_index) = self.check(address, payload.len())?;
        let replacement = self.make_room(d.set, d.tag)?;

        let outcome =
            self.sets[d.set].store(d.tag, d.offset, payload, &self.backing, block_index)?;
        tracing::trace!(%address, size = payload.len(), ?outcome, "store");

        Ok(StoreResult {
            address,
            outcome,
            replacement,
        })
    }

    /// Validated geometry.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Backing memory, as last written back.
    pub const fn backing(&self) -> &BackingStore {
        &self.backing
    }

    /// Set `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Returns `true` if the block containing `address` is resident.
    pub fn contains(&self, address: PhysAddr) -> bool {
        let d = self.geometry.decompose(address);
        self.sets[d.set].probe(d.tag).is_hit()
    }

    /// Dirty bit of the block containing `address`, or `None` if not resident.
    pub fn is_dirty(&self, address: PhysAddr) -> Option<bool> {
        let d = self.geometry.decompose(address);
        self.sets[d.set].is_dirty(d.tag)
    }

    /// Tags resident in set `index`, oldest first. Empty for an unknown set.
    pub fn resident_tags(&self, index: usize) -> Vec<u64> {
        self.sets
            .get(index)
            .map(CacheSet::resident_tags)
            .unwrap_or_default()
    }

    /// Rejects accesses the sets must never see and returns the decomposition
    /// plus the backing block index of `address`.
    fn check(&self, address: PhysAddr, size: usize) -> Result<(Decomposed, usize), CacheError> {
        if size == 0 {
            return Err(CacheError::EmptyAccess { address });
        }
        let d = self.geometry.decompose(address);
        let block_size = self.geometry.block_size();
        if size > block_size - d.offset {
            return Err(CacheError::Straddle {
                address,
                size,
                offset: d.offset,
                block_size,
            });
        }
        let block_index = self.backing.index_of(address)?;
        Ok((d, block_index))
    }

    /// Writes back the victim if accessing `tag` in `set_index` will evict it.
    fn make_room(&mut self, set_index: usize, tag: u64) -> Result<Option<Replacement>, CacheError> {
        let set = &self.sets[set_index];
        if !set.will_evict(tag) {
            return Ok(None);
        }
        let Some(victim) = set.victim() else {
            return Ok(None);
        };

        let address = self.geometry.block_base(victim.tag, set_index);
        let state = LineState::from_dirty(victim.dirty);
        if victim.dirty {
            let index = self.backing.index_of(address)?;
            self.backing.write_block(index, victim.data)?;
            tracing::debug!(%address, set = set_index, "dirty eviction written back");
        } else {
            tracing::debug!(%address, set = set_index, "clean eviction");
        }

        Ok(Some(Replacement { address, state }))
    }
}
