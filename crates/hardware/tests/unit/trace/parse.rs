//! # Trace Line Parsing
//!
//! ```text
//! load  0x<hex-address> <decimal-size>
//! store 0x<hex-address> <decimal-size> <hex-payload>
//! ```

use cachesim_core::common::{AccessKind, ParseError, PhysAddr};
use cachesim_core::trace::TraceRecord;
use rstest::rstest;

fn parse(line: &str) -> Result<TraceRecord, ParseError> {
    line.parse()
}

// ══════════════════════════════════════════════════════════
// 1. Accepted lines
// ══════════════════════════════════════════════════════════

#[test]
fn test_load() {
    let record = parse("load 0x1f40 8").unwrap();
    assert_eq!(
        record,
        TraceRecord::Load {
            address: PhysAddr::new(0x1f40),
            size: 8,
        }
    );
    assert_eq!(record.kind(), AccessKind::Load);
    assert_eq!(record.address(), PhysAddr::new(0x1f40));
    assert_eq!(record.size(), 8);
}

#[test]
fn test_store_payload_is_in_address_order() {
    let record = parse("store 0x400 4 11223344").unwrap();
    assert_eq!(
        record,
        TraceRecord::Store {
            address: PhysAddr::new(0x400),
            payload: vec![0x11, 0x22, 0x33, 0x44],
        }
    );
    assert_eq!(record.kind(), AccessKind::Store);
    assert_eq!(record.size(), 4);
}

#[rstest]
#[case("load 0X10 1", 0x10)]
#[case("load 0xABCdef 1", 0xab_cdef)]
#[case("  load\t0x0   1  ", 0)]
#[case("load 0x000040 1", 0x40)]
fn test_accepted_address_forms(#[case] line: &str, #[case] expected: u64) {
    assert_eq!(parse(line).unwrap().address(), PhysAddr::new(expected));
}

#[test]
fn test_payload_case_insensitive() {
    let upper = parse("store 0x0 2 ABcd").unwrap();
    let lower = parse("store 0x0 2 abCD").unwrap();
    assert_eq!(upper, lower);
}

#[rstest]
#[case("load 0x0 4")]
#[case("load 0xdeadbeef 1")]
#[case("store 0x400 4 aabbccdd")]
fn test_display_round_trips(#[case] line: &str) {
    assert_eq!(parse(line).unwrap().to_string(), line);
}

// ══════════════════════════════════════════════════════════
// 2. Rejected lines
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("", ParseError::MissingField("access type"))]
#[case("fetch 0x0 4", ParseError::UnknownKind("fetch".into()))]
#[case("LOAD 0x0 4", ParseError::UnknownKind("LOAD".into()))]
#[case("load", ParseError::MissingField("address"))]
#[case("load 0x0", ParseError::MissingField("size"))]
#[case("store 0x0 4", ParseError::MissingField("payload"))]
#[case("load 100 4", ParseError::BadAddress("100".into()))]
#[case("load 0x 4", ParseError::BadAddress("0x".into()))]
#[case("load 0xfg 4", ParseError::BadAddress("0xfg".into()))]
#[case("load 0x-1 4", ParseError::BadAddress("0x-1".into()))]
#[case("load 0x10000000000000000 4", ParseError::BadAddress("0x10000000000000000".into()))]
#[case("load 0x0 0", ParseError::BadSize("0".into()))]
#[case("load 0x0 -4", ParseError::BadSize("-4".into()))]
#[case("load 0x0 +4", ParseError::BadSize("+4".into()))]
#[case("load 0x0 0x4", ParseError::BadSize("0x4".into()))]
#[case("store 0x0 2 zz00", ParseError::BadPayload("zz00".into()))]
#[case("store 0x0 2 aabbcc", ParseError::PayloadLength { expected: 4, found: 6 })]
#[case("store 0x0 2 abc", ParseError::PayloadLength { expected: 4, found: 3 })]
#[case("load 0x0 4 aabbccdd", ParseError::TrailingField("aabbccdd".into()))]
#[case("store 0x0 1 aa bb", ParseError::TrailingField("bb".into()))]
fn test_rejected(#[case] line: &str, #[case] expected: ParseError) {
    assert_eq!(parse(line).unwrap_err(), expected);
}
