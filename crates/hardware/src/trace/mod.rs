//! Trace input.
//!
//! [`TraceReader`] turns any buffered reader into a lazy, finite,
//! non-restartable stream of [`TraceRecord`]s. It owns all reader state,
//! tracks line numbers for diagnostics, skips blank lines, and stops for good
//! after the first error.

/// Trace line grammar.
pub mod record;

pub use self::record::TraceRecord;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::Path;

use crate::common::{ParseError, TraceError};

/// Iterator over the records of a trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace file at `path`.
    ///
    /// # Errors
    ///
    /// [`TraceError::Io`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Reads records from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
            done: false,
        }
    }

    /// 1-based number of the line most recently read, 0 before the first.
    pub const fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(TraceError::Io(e)));
                }
            }
            self.line += 1;

            let parsed = match std::str::from_utf8(&self.buf) {
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => text.parse::<TraceRecord>(),
                Err(_) => Err(ParseError::InvalidUtf8),
            };
            return Some(parsed.map_err(|source| {
                self.done = true;
                TraceError::Malformed {
                    line: self.line,
                    source,
                }
            }));
        }
    }
}

impl<R: BufRead> FusedIterator for TraceReader<R> {}
