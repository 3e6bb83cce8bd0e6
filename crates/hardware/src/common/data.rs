//! Memory access classification.
//!
//! Every trace record and every engine result is tagged with the kind of
//! access it describes, and every access resolves to either a hit or a miss.

use std::fmt;

use serde::Serialize;

/// Kind of memory operation carried by a trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// Data read; returns bytes to the caller.
    Load,

    /// Data write; carries a payload.
    Store,
}

impl AccessKind {
    /// The trace keyword for this access kind.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Result of looking a tag up in a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The block was resident.
    Hit,
    /// The block had to be filled from backing memory.
    Miss,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        })
    }
}

/// Whether an evicted block had to be written back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineState {
    /// Block matched backing memory; eviction wrote nothing.
    Clean,
    /// Block was modified; eviction wrote it back.
    Dirty,
}

impl LineState {
    /// Maps a dirty bit to a line state.
    #[inline]
    pub const fn from_dirty(dirty: bool) -> Self {
        if dirty { Self::Dirty } else { Self::Clean }
    }
}

impl fmt::Display for LineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
        })
    }
}
