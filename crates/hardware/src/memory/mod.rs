//! Backing memory behind the cache.
//!
//! This module implements the passive store that the cache fills from and
//! writes back to:
//! 1. **Buffer:** a zero-initialized byte allocation (see [`buffer`]).
//! 2. **BackingStore:** block-granular read/write over that buffer.
//!
//! The store has no policy. It is sized once at construction and every access
//! outside its range is a fatal capacity error.

/// Zero-initialized byte buffer (mmap or heap).
pub mod buffer;

use self::buffer::ZeroedBuffer;
use crate::common::{CacheError, ConfigError, PhysAddr};
use crate::config::MemoryConfig;

/// Block-addressed backing memory.
///
/// Holds `size_bytes / block_size` blocks; a trailing partial block is not
/// addressable. Blocks that were never written read as zeros.
#[derive(Debug)]
pub struct BackingStore {
    buffer: ZeroedBuffer,
    block_size: usize,
    block_count: usize,
}

impl BackingStore {
    /// Creates a zeroed store of `memory.size_bytes` organised in `block_size` blocks.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroBlockSize`] for a zero block size and
    /// [`ConfigError::MemoryTooSmall`] if not even one block fits.
    pub fn new(memory: &MemoryConfig, block_size: usize) -> Result<Self, ConfigError> {
        if block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        let block_count = memory.size_bytes / block_size;
        if block_count == 0 {
            return Err(ConfigError::MemoryTooSmall {
                memory_bytes: memory.size_bytes,
                block_size,
            });
        }
        Ok(Self {
            buffer: ZeroedBuffer::new(block_count * block_size),
            block_size,
            block_count,
        })
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of addressable blocks.
    pub const fn block_count(&self) -> usize {
        self.block_count
    }

    /// Returns the block index for `addr`, or an error if it lies past the end.
    ///
    /// # Errors
    ///
    /// [`CacheError::OutOfRange`] if the block is not backed.
    pub fn index_of(&self, addr: PhysAddr) -> Result<usize, CacheError> {
        let block_index = addr.block_index(self.block_size);
        if block_index < self.block_count as u64 {
            Ok(block_index as usize)
        } else {
            Err(CacheError::OutOfRange {
                address: addr,
                block_index,
                block_count: self.block_count,
            })
        }
    }

    /// Returns the current contents of block `index`.
    ///
    /// # Errors
    ///
    /// [`CacheError::OutOfRange`] if `index` is not backed.
    pub fn read_block(&self, index: usize) -> Result<&[u8], CacheError> {
        let range = self.range(index)?;
        Ok(&self.buffer.as_slice()[range])
    }

    /// Overwrites block `index` with `data`.
    ///
    /// `data` must be exactly one block long.
    ///
    /// # Errors
    ///
    /// [`CacheError::OutOfRange`] if `index` is not backed.
    pub fn write_block(&mut self, index: usize, data: &[u8]) -> Result<(), CacheError> {
        debug_assert_eq!(data.len(), self.block_size, "partial block write-back");
        let range = self.range(index)?;
        self.buffer.as_mut_slice()[range].copy_from_slice(data);
        Ok(())
    }

    fn range(&self, index: usize) -> Result<std::ops::Range<usize>, CacheError> {
        if index >= self.block_count {
            return Err(CacheError::OutOfRange {
                address: PhysAddr::new(index as u64 * self.block_size as u64),
                block_index: index as u64,
                block_count: self.block_count,
            });
        }
        let start = index * self.block_size;
        Ok(start..start + self.block_size)
    }
}
