//! A single parsed trace line.
//!
//! ```text
//! load  0x<hex-address> <decimal-size>
//! store 0x<hex-address> <decimal-size> <hex-payload>
//! ```
//!
//! Parsing is strict: every field must be well formed and nothing may follow
//! the last one. The payload lists bytes in address order, two hex digits each.

use std::fmt;
use std::str::FromStr;

use crate::common::{AccessKind, ParseError, PhysAddr};

/// One memory access from a trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceRecord {
    /// Read `size` bytes at `address`.
    Load {
        /// Target address.
        address: PhysAddr,
        /// Bytes to read.
        size: usize,
    },
    /// Write `payload` at `address`.
    Store {
        /// Target address.
        address: PhysAddr,
        /// Bytes to write; the access size is its length.
        payload: Vec<u8>,
    },
}

impl TraceRecord {
    /// Load or store.
    pub const fn kind(&self) -> AccessKind {
        match self {
            Self::Load { .. } => AccessKind::Load,
            Self::Store { .. } => AccessKind::Store,
        }
    }

    /// Target address.
    pub const fn address(&self) -> PhysAddr {
        match self {
            Self::Load { address, .. } | Self::Store { address, .. } => *address,
        }
    }

    /// Access size in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Load { size, .. } => *size,
            Self::Store { payload, .. } => payload.len(),
        }
    }
}

impl FromStr for TraceRecord {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();

        let kind = match fields.next() {
            Some("load") => AccessKind::Load,
            Some("store") => AccessKind::Store,
            Some(other) => return Err(ParseError::UnknownKind(other.to_owned())),
            None => return Err(ParseError::MissingField("access type")),
        };
        let address = parse_address(fields.next().ok_or(ParseError::MissingField("address"))?)?;
        let size = parse_size(fields.next().ok_or(ParseError::MissingField("size"))?)?;

        let record = match kind {
            AccessKind::Load => Self::Load { address, size },
            AccessKind::Store => {
                let hex = fields.next().ok_or(ParseError::MissingField("payload"))?;
                Self::Store {
                    address,
                    payload: parse_payload(hex, size)?,
                }
            }
        };

        match fields.next() {
            Some(extra) => Err(ParseError::TrailingField(extra.to_owned())),
            None => Ok(record),
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { address, size } => write!(f, "load {address} {size}"),
            Self::Store { address, payload } => {
                write!(f, "store {address} {} ", payload.len())?;
                payload.iter().try_for_each(|b| write!(f, "{b:02x}"))
            }
        }
    }
}

fn parse_address(field: &str) -> Result<PhysAddr, ParseError> {
    let bad = || ParseError::BadAddress(field.to_owned());
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .ok_or_else(bad)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    u64::from_str_radix(digits, 16)
        .map(PhysAddr::new)
        .map_err(|_| bad())
}

fn parse_size(field: &str) -> Result<usize, ParseError> {
    let bad = || ParseError::BadSize(field.to_owned());
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    match field.parse::<usize>() {
        Ok(0) | Err(_) => Err(bad()),
        Ok(size) => Ok(size),
    }
}

fn parse_payload(field: &str, size: usize) -> Result<Vec<u8>, ParseError> {
    if !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::BadPayload(field.to_owned()));
    }
    let expected = size.saturating_mul(2);
    if field.len() != expected {
        return Err(ParseError::PayloadLength {
            expected,
            found: field.len(),
        });
    }
    Ok(field
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| (hex_value(pair[0]) << 4) | hex_value(pair[1]))
        .collect())
}

/// Value of an ASCII hex digit already known to be valid.
const fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
