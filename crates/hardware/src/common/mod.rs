//! Common types shared by every part of the simulator.
//!
//! 1. **Address Types:** the [`PhysAddr`] newtype.
//! 2. **Access Classification:** load/store kinds, hit/miss outcomes, clean/dirty state.
//! 3. **Error Handling:** configuration, access, trace, and simulation errors.

/// Physical address type.
pub mod addr;

/// Access kind, outcome, and line-state enums.
pub mod data;

/// Error types.
pub mod error;

pub use addr::PhysAddr;
pub use data::{AccessKind, LineState, Outcome};
pub use error::{CacheError, ConfigError, ParseError, SimError, TraceError};
