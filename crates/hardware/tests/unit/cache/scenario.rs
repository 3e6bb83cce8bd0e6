//! # Reference Scenario
//!
//! Direct-mapped, 1 KiB, 64-byte blocks: 16 sets, so `0x0` and `0x400` both
//! map to set 0 with tags 0 and 1.

use cachesim_core::common::PhysAddr;
use pretty_assertions::assert_eq;

use crate::common::harness::{config, mask_config, replay_ok};

const TRACE: &str = "\
store 0x0 4 AABBCCDD
store 0x400 4 11223344
load 0x0 4
";

#[test]
fn test_scenario_output() {
    let replay = replay_ok(&config(1, 1, 64), TRACE);
    assert_eq!(
        replay.output,
        "\
store 0x0 miss
replacement 0x0 dirty
store 0x400 miss
replacement 0x400 dirty
load 0x0 miss aabbccdd
"
    );
}

#[test]
fn test_scenario_backing_contents() {
    let replay = replay_ok(&config(1, 1, 64), TRACE);
    let backing = replay.sim.cache().backing();

    let mut block0 = vec![0u8; 64];
    block0[..4].copy_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);
    assert_eq!(backing.read_block(0).unwrap(), &block0[..]);

    let mut block16 = vec![0u8; 64];
    block16[..4].copy_from_slice(&[0x11, 0x22, 0x33, 0x44]);
    assert_eq!(backing.read_block(16).unwrap(), &block16[..]);

    let cache = replay.sim.cache();
    assert!(cache.contains(PhysAddr::new(0)));
    assert_eq!(cache.is_dirty(PhysAddr::new(0)), Some(false));
    assert!(!cache.contains(PhysAddr::new(0x400)));
}

#[test]
fn test_scenario_same_under_mask_addressing() {
    let modulo = replay_ok(&config(1, 1, 64), TRACE);
    let mask = replay_ok(&mask_config(1, 1, 64), TRACE);
    assert_eq!(modulo.output, mask.output);
}

#[test]
fn test_two_way_keeps_both_blocks() {
    let replay = replay_ok(&config(1, 2, 64), TRACE);
    assert_eq!(
        replay.lines(),
        ["store 0x0 miss", "store 0x400 miss", "load 0x0 hit aabbccdd"]
    );
}

#[test]
fn test_load_reports_bytes_in_address_order() {
    let trace = "\
store 0x10 8 0102030405060708
load 0x12 3
load 0x10 1
load 0x17 1
";
    let replay = replay_ok(&config(1, 1, 64), trace);
    assert_eq!(
        replay.lines(),
        [
            "store 0x10 miss",
            "load 0x12 hit 030405",
            "load 0x10 hit 01",
            "load 0x17 hit 08",
        ]
    );
}

#[test]
fn test_untouched_memory_loads_zeros() {
    let replay = replay_ok(&config(1, 1, 64), "load 0xabc0 4\n");
    assert_eq!(replay.output, "load 0xabc0 miss 00000000\n");
}
