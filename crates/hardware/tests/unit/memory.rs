//! # Backing Store Tests
//!
//! Sizing, bounds, and block-granular reads and writes.

use cachesim_core::common::{CacheError, ConfigError, PhysAddr};
use cachesim_core::config::MemoryConfig;
use cachesim_core::memory::BackingStore;

fn store(size_bytes: usize, block_size: usize) -> BackingStore {
    BackingStore::new(&MemoryConfig { size_bytes }, block_size).unwrap()
}

#[test]
fn test_block_count_drops_partial_tail() {
    let backing = store(1000, 64);
    assert_eq!(backing.block_size(), 64);
    assert_eq!(backing.block_count(), 15);
}

#[test]
fn test_rejects_zero_block_and_tiny_memory() {
    let memory = MemoryConfig { size_bytes: 32 };
    assert_eq!(
        BackingStore::new(&memory, 0).unwrap_err(),
        ConfigError::ZeroBlockSize
    );
    assert_eq!(
        BackingStore::new(&memory, 64).unwrap_err(),
        ConfigError::MemoryTooSmall {
            memory_bytes: 32,
            block_size: 64,
        }
    );
}

#[test]
fn test_fresh_blocks_read_as_zero() {
    let backing = store(4096, 64);
    for index in [0, 31, 63] {
        assert!(backing.read_block(index).unwrap().iter().all(|&b| b == 0));
    }
}

#[test]
fn test_write_then_read_block() {
    let mut backing = store(4096, 16);
    let data: Vec<u8> = (0..16).collect();
    backing.write_block(5, &data).unwrap();

    assert_eq!(backing.read_block(5).unwrap(), &data[..]);
    assert!(backing.read_block(4).unwrap().iter().all(|&b| b == 0));
    assert!(backing.read_block(6).unwrap().iter().all(|&b| b == 0));
}

#[test]
fn test_index_of_bounds() {
    let backing = store(1024, 64);
    assert_eq!(backing.index_of(PhysAddr::new(0)).unwrap(), 0);
    assert_eq!(backing.index_of(PhysAddr::new(1023)).unwrap(), 15);
    assert_eq!(
        backing.index_of(PhysAddr::new(1024)).unwrap_err(),
        CacheError::OutOfRange {
            address: PhysAddr::new(1024),
            block_index: 16,
            block_count: 16,
        }
    );
}

#[test]
fn test_out_of_range_block_access() {
    let mut backing = store(1024, 64);
    assert!(backing.read_block(16).is_err());
    assert!(backing.write_block(16, &[0; 64]).is_err());
}
