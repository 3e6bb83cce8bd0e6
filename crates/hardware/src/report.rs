//! Text rendering of simulation events.
//!
//! Each [`Event`] becomes exactly one output line. Replacement lines come out
//! before the access they made room for because that is the order the engine
//! returns them in; the reporter does no reordering of its own.

use std::io::{self, Write};

use crate::cache::Event;

/// Writes one line per event to an underlying writer.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    lines: u64,
}

impl<W: Write> Reporter<W> {
    /// Wraps `out`. Callers should pass a buffered writer for large traces.
    pub const fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Writes `event` followed by a newline.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn report(&mut self, event: &Event) -> io::Result<()> {
        writeln!(self.out, "{event}")?;
        self.lines += 1;
        Ok(())
    }

    /// Number of lines written so far.
    pub const fn lines(&self) -> u64 {
        self.lines
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates flush failures.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
