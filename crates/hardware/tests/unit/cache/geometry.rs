//! # Geometry Tests
//!
//! Address decomposition must be a bijection for every accepted geometry, and
//! the shift/mask fast path must agree with the division path wherever it is
//! allowed at all.

use cachesim_core::cache::{Decomposed, Geometry};
use cachesim_core::common::{ConfigError, PhysAddr};
use cachesim_core::config::{AddressingMode, CacheConfig};
use proptest::prelude::*;
use rstest::rstest;

fn masked(size_kib: usize, ways: usize, block: usize) -> CacheConfig {
    CacheConfig {
        addressing: AddressingMode::Mask,
        ..CacheConfig::new(size_kib, ways, block)
    }
}

// ══════════════════════════════════════════════════════════
// 1. Derived dimensions
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(1, 1, 64, 16)]
#[case(1, 2, 64, 8)]
#[case(4, 4, 32, 32)]
#[case(1, 3, 64, 5)]
#[case(2, 1, 48, 42)]
fn test_num_sets(
    #[case] size_kib: usize,
    #[case] ways: usize,
    #[case] block: usize,
    #[case] sets: usize,
) {
    let geometry = Geometry::new(&CacheConfig::new(size_kib, ways, block)).unwrap();
    assert_eq!(geometry.num_sets(), sets);
    assert_eq!(geometry.ways(), ways);
    assert_eq!(geometry.block_size(), block);
    assert_eq!(geometry.capacity(), sets * ways * block);
}

#[test]
fn test_capacity_drops_remainder() {
    let geometry = Geometry::new(&CacheConfig::new(1, 3, 64)).unwrap();
    assert_eq!(geometry.capacity(), 960);
}

#[test]
fn test_reference_decomposition() {
    let geometry = Geometry::new(&CacheConfig::new(1, 1, 64)).unwrap();
    assert_eq!(
        geometry.decompose(PhysAddr::new(0x400)),
        Decomposed {
            set: 0,
            tag: 1,
            offset: 0,
        }
    );
    assert_eq!(
        geometry.decompose(PhysAddr::new(0x7c5)),
        Decomposed {
            set: 15,
            tag: 1,
            offset: 5,
        }
    );
    assert_eq!(geometry.block_base(1, 15), PhysAddr::new(0x7c0));
}

// ══════════════════════════════════════════════════════════
// 2. Validation
// ══════════════════════════════════════════════════════════

#[test]
fn test_rejects_zero_dimensions() {
    assert_eq!(
        Geometry::new(&CacheConfig::new(1, 1, 0)).unwrap_err(),
        ConfigError::ZeroBlockSize
    );
    assert_eq!(
        Geometry::new(&CacheConfig::new(1, 0, 64)).unwrap_err(),
        ConfigError::ZeroAssociativity
    );
}

#[test]
fn test_rejects_cache_smaller_than_a_set() {
    assert_eq!(
        Geometry::new(&CacheConfig::new(1, 32, 64)).unwrap_err(),
        ConfigError::ZeroSets {
            cache_bytes: 1024,
            ways: 32,
            block_size: 64,
        }
    );
    assert!(matches!(
        Geometry::new(&CacheConfig::new(0, 1, 64)),
        Err(ConfigError::ZeroSets { .. })
    ));
}

#[test]
fn test_rejects_size_that_overflows_bytes() {
    let size_kib = (1usize << 54) + 1;
    assert_eq!(
        Geometry::new(&CacheConfig::new(size_kib, 1, 64)).unwrap_err(),
        ConfigError::CacheTooLarge { size_kib }
    );
    assert_eq!(
        Geometry::new(&CacheConfig::new(usize::MAX, 1, 64)).unwrap_err(),
        ConfigError::CacheTooLarge {
            size_kib: usize::MAX,
        }
    );
}

#[test]
fn test_mask_requires_power_of_two_block() {
    assert_eq!(
        Geometry::new(&masked(1, 1, 48)).unwrap_err(),
        ConfigError::NotPowerOfTwo {
            what: "block size",
            value: 48,
        }
    );
}

#[test]
fn test_mask_requires_power_of_two_sets() {
    assert_eq!(
        Geometry::new(&masked(3, 1, 64)).unwrap_err(),
        ConfigError::NotPowerOfTwo {
            what: "set count",
            value: 48,
        }
    );
    // The same geometry is fine under modulo addressing.
    assert_eq!(
        Geometry::new(&CacheConfig::new(3, 1, 64)).unwrap().num_sets(),
        48
    );
}

#[test]
fn test_mask_accepts_power_of_two_geometry() {
    let geometry = Geometry::new(&masked(4, 2, 32)).unwrap();
    assert_eq!(geometry.addressing(), AddressingMode::Mask);
    assert_eq!(geometry.num_sets(), 64);
}

// ══════════════════════════════════════════════════════════
// 3. Properties
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn decomposition_is_bijective(
        size_kib in 1usize..=8,
        ways in 1usize..=4,
        block in prop::sample::select(vec![1usize, 3, 16, 48, 64, 100]),
        raw in 0u64..(1 << 40),
    ) {
        let geometry = Geometry::new(&CacheConfig::new(size_kib, ways, block)).unwrap();
        let addr = PhysAddr::new(raw);
        let d = geometry.decompose(addr);

        prop_assert!(d.set < geometry.num_sets());
        prop_assert!(d.offset < geometry.block_size());
        let rebuilt = d.tag * (geometry.num_sets() * block) as u64
            + (d.set * block) as u64
            + d.offset as u64;
        prop_assert_eq!(rebuilt, raw);
        prop_assert_eq!(geometry.block_base(d.tag, d.set).val() + d.offset as u64, raw);
    }

    #[test]
    fn mask_agrees_with_modulo(
        size_kib in prop::sample::select(vec![1usize, 2, 4, 8]),
        ways in prop::sample::select(vec![1usize, 2, 4]),
        block_shift in 0u32..=7,
        raw in any::<u64>(),
    ) {
        let block = 1usize << block_shift;
        let modulo = Geometry::new(&CacheConfig::new(size_kib, ways, block)).unwrap();
        let mask = Geometry::new(&masked(size_kib, ways, block)).unwrap();
        let addr = PhysAddr::new(raw);

        prop_assert_eq!(modulo.num_sets(), mask.num_sets());
        prop_assert_eq!(modulo.decompose(addr), mask.decompose(addr));
    }
}
