//! Configuration system for the cache simulator.
//!
//! This module defines the structures used to parameterize a simulation run:
//! 1. **Defaults:** Baseline cache geometry and backing-memory size.
//! 2. **Structures:** Cache and memory configuration, grouped under [`Config`].
//! 3. **Enums:** The address decomposition mode.
//!
//! Configuration is supplied by the CLI or deserialized from JSON. Nothing here
//! is validated; [`Geometry::new`](crate::cache::Geometry::new) and
//! [`BackingStore::new`](crate::memory::BackingStore::new) reject values that
//! cannot describe a cache.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache capacity (1 KiB).
    pub const CACHE_SIZE_KIB: usize = 1;

    /// Default block size in bytes (64 bytes).
    pub const LINE_BYTES: usize = 64;

    /// Default associativity (1 way = direct-mapped).
    pub const WAYS: usize = 1;

    /// Default backing memory size (16 MiB).
    ///
    /// Large enough for every address a 24-bit trace can reference.
    pub const MEMORY_BYTES: usize = 16 * 1024 * 1024;
}

/// How an address is split into set index, tag, and block offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AddressingMode {
    /// Division and remainder. Valid for any block size and set count.
    #[default]
    #[serde(alias = "modulo")]
    Modulo,
    /// Shifts and bit masks.
    ///
    /// Requires a power-of-two block size and set count; geometry
    /// construction fails otherwise.
    #[serde(alias = "mask")]
    Mask,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{AddressingMode, Config};
///
/// let json = r#"{
///     "cache": {
///         "size_kib": 4,
///         "ways": 2,
///         "line_bytes": 32,
///         "addressing": "Mask"
///     },
///     "memory": {
///         "size_bytes": 1048576
///     }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.cache.size_bytes(), Some(4096));
/// assert_eq!(config.cache.addressing, AddressingMode::Mask);
/// assert_eq!(config.memory.size_bytes, 1 << 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Cache geometry
    #[serde(default)]
    pub cache: CacheConfig,
    /// Backing memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Cache geometry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Total cache capacity in KiB
    #[serde(default = "CacheConfig::default_size_kib")]
    pub size_kib: usize,

    /// Associativity (blocks per set)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Block size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Address decomposition mode
    #[serde(default)]
    pub addressing: AddressingMode,
}

impl CacheConfig {
    /// Creates a configuration with modulo addressing.
    pub const fn new(size_kib: usize, ways: usize, line_bytes: usize) -> Self {
        Self {
            size_kib,
            ways,
            line_bytes,
            addressing: AddressingMode::Modulo,
        }
    }

    /// Total cache capacity in bytes, or `None` if it does not fit in `usize`.
    pub const fn size_bytes(&self) -> Option<usize> {
        self.size_kib.checked_mul(1024)
    }

    fn default_size_kib() -> usize {
        defaults::CACHE_SIZE_KIB
    }

    fn default_ways() -> usize {
        defaults::WAYS
    }

    fn default_line() -> usize {
        defaults::LINE_BYTES
    }
}

impl Default for CacheConfig {
    /// A 1 KiB direct-mapped cache with 64-byte blocks.
    fn default() -> Self {
        Self::new(
            defaults::CACHE_SIZE_KIB,
            defaults::WAYS,
            defaults::LINE_BYTES,
        )
    }
}

/// Backing memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Backing memory size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    fn default_size() -> usize {
        defaults::MEMORY_BYTES
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_BYTES,
        }
    }
}
