//! Input sources for file runs
//!
//! Regular, non-empty files are memory-mapped when the `mmap` feature is on;
//! everything else (empty files, pipes, devices) is read through a buffer.

use crate::error::{CodecError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::io::Cursor;

/// Readable input for a run
pub enum Input {
    /// Whole file mapped into memory
    #[cfg(feature = "mmap")]
    Mapped(Cursor<Mmap>),
    /// Buffered file reader
    Buffered(BufReader<File>),
}

impl Input {
    /// Open `path` for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CodecError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;

        #[cfg(feature = "mmap")]
        {
            let metadata = file.metadata()?;
            if metadata.is_file() && metadata.len() > 0 {
                // SAFETY: the map is read-only and owned by the returned Input, which
                // keeps it alive for every read
                match unsafe { Mmap::map(&file) } {
                    Ok(map) => {
                        debug!(path = %path.display(), len = map.len(), "mapped input");
                        return Ok(Input::Mapped(Cursor::new(map)));
                    }
                    Err(e) => debug!(path = %path.display(), error = %e, "mmap failed, buffering"),
                }
            }
        }

        debug!(path = %path.display(), "buffered input");
        Ok(Input::Buffered(BufReader::new(file)))
    }

    /// Whether the input is memory-mapped
    pub fn is_mapped(&self) -> bool {
        match self {
            #[cfg(feature = "mmap")]
            Input::Mapped(_) => true,
            Input::Buffered(_) => false,
        }
    }
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            #[cfg(feature = "mmap")]
            Input::Mapped(cursor) => cursor.read(buf),
            Input::Buffered(reader) => reader.read(buf),
        }
    }
}

impl BufRead for Input {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            #[cfg(feature = "mmap")]
            Input::Mapped(cursor) => cursor.fill_buf(),
            Input::Buffered(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            #[cfg(feature = "mmap")]
            Input::Mapped(cursor) => cursor.consume(amt),
            Input::Buffered(reader) => reader.consume(amt),
        }
    }
}
