//! Cache geometry and address decomposition.
//!
//! A byte address splits into three fields:
//!
//! ```text
//! set    = (addr / block_size) mod num_sets
//! tag    =  addr / (block_size * num_sets)
//! offset =  addr mod block_size
//! addr   = tag * num_sets * block_size + set * block_size + offset
//! ```
//!
//! [`AddressingMode::Modulo`] computes these with division and holds for any
//! sizes. [`AddressingMode::Mask`] uses shifts and masks and is only accepted
//! when both `block_size` and `num_sets` are powers of two, in which case the
//! two modes agree on every address.

use crate::common::{ConfigError, PhysAddr};
use crate::config::{AddressingMode, CacheConfig};

/// An address split into its cache coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposed {
    /// Set index, `< num_sets`.
    pub set: usize,
    /// Tag identifying the block within its set.
    pub tag: u64,
    /// Byte offset within the block, `< block_size`.
    pub offset: usize,
}

/// Validated cache dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    block_size: usize,
    ways: usize,
    num_sets: usize,
    addressing: AddressingMode,
    block_shift: u32,
    set_bits: u32,
}

impl Geometry {
    /// Derives `num_sets = size / (block_size * ways)` and validates the result.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroBlockSize`] / [`ConfigError::ZeroAssociativity`]
    ///   for zero dimensions.
    /// - [`ConfigError::CacheTooLarge`] if the size in bytes overflows `usize`.
    /// - [`ConfigError::ZeroSets`] if the cache cannot hold a single set.
    /// - [`ConfigError::NotPowerOfTwo`] if mask addressing is requested for a
    ///   non-power-of-two block size or set count.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let block_size = config.line_bytes;
        let ways = config.ways;
        if block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }

        let cache_bytes = config.size_bytes().ok_or(ConfigError::CacheTooLarge {
            size_kib: config.size_kib,
        })?;
        let set_bytes = block_size.checked_mul(ways).unwrap_or(usize::MAX);
        let num_sets = cache_bytes / set_bytes;
        if num_sets == 0 {
            return Err(ConfigError::ZeroSets {
                cache_bytes,
                ways,
                block_size,
            });
        }
        if cache_bytes % set_bytes != 0 {
            tracing::warn!(
                cache_bytes,
                used = num_sets * set_bytes,
                "cache size is not a multiple of the set size; remainder is unused"
            );
        }

        if config.addressing == AddressingMode::Mask {
            if !block_size.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo {
                    what: "block size",
                    value: block_size,
                });
            }
            if !num_sets.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo {
                    what: "set count",
                    value: num_sets,
                });
            }
        }

        Ok(Self {
            block_size,
            ways,
            num_sets,
            addressing: config.addressing,
            block_shift: block_size.trailing_zeros(),
            set_bits: num_sets.trailing_zeros(),
        })
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Bytes actually covered by the sets (`num_sets * ways * block_size`).
    pub const fn capacity(&self) -> usize {
        self.num_sets * self.ways * self.block_size
    }

    /// Address decomposition mode.
    pub const fn addressing(&self) -> AddressingMode {
        self.addressing
    }

    /// Set index of `addr`.
    #[inline]
    pub const fn set_index(&self, addr: PhysAddr) -> usize {
        match self.addressing {
            AddressingMode::Modulo => {
                ((addr.val() / self.block_size as u64) % self.num_sets as u64) as usize
            }
            AddressingMode::Mask => {
                ((addr.val() >> self.block_shift) & (self.num_sets as u64 - 1)) as usize
            }
        }
    }

    /// Tag of `addr`.
    #[inline]
    pub const fn tag(&self, addr: PhysAddr) -> u64 {
        match self.addressing {
            AddressingMode::Modulo => {
                addr.val() / (self.block_size as u64 * self.num_sets as u64)
            }
            AddressingMode::Mask => addr.val() >> (self.block_shift + self.set_bits),
        }
    }

    /// Offset of `addr` within its block.
    #[inline]
    pub const fn offset(&self, addr: PhysAddr) -> usize {
        match self.addressing {
            AddressingMode::Modulo => (addr.val() % self.block_size as u64) as usize,
            AddressingMode::Mask => (addr.val() & (self.block_size as u64 - 1)) as usize,
        }
    }

    /// Splits `addr` into set, tag, and offset.
    #[inline]
    pub const fn decompose(&self, addr: PhysAddr) -> Decomposed {
        Decomposed {
            set: self.set_index(addr),
            tag: self.tag(addr),
            offset: self.offset(addr),
        }
    }

    /// First byte address of the block with `tag` in `set`.
    #[inline]
    pub const fn block_base(&self, tag: u64, set: usize) -> PhysAddr {
        PhysAddr::new((tag * self.num_sets as u64 + set as u64) * self.block_size as u64)
    }
}
