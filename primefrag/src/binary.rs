//! Binary stream codec
//!
//! Every source byte becomes one record: a count byte `N` followed by `N`
//! fragments of 8 bytes each, little-endian.

use crate::codec::RunStats;
use crate::error::{CodecError, Result};
use primefrag_core::constants::{FRAGMENT_SIZE, MAX_FRAGMENT_COUNT};
use primefrag_core::{decode_fragments, ExponentVector, Fragment, PrimeTable};
use std::io::{self, BufRead, ErrorKind, Read, Write};
use tracing::{info, trace};

/// Binary record encoder/decoder bound to a prime table
#[derive(Debug, Clone, Copy)]
pub struct BinaryCodec<'t> {
    table: &'t PrimeTable,
    verbose: bool,
}

impl<'t> BinaryCodec<'t> {
    pub fn new(table: &'t PrimeTable) -> Self {
        Self {
            table,
            verbose: false,
        }
    }

    /// Log every record at info level
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Encode every byte of `reader` into records on `writer`
    pub fn encode<R: BufRead, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let mut fragments: Vec<Fragment> = Vec::with_capacity(8);

        loop {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if chunk.is_empty() {
                break;
            }
            let consumed = chunk.len();

            for &value in chunk {
                let offset = stats.bytes_read;
                let vector = ExponentVector::factorize(value, self.table)
                    .map_err(|source| CodecError::Encode {
                        offset,
                        value,
                        source,
                    })?;

                fragments.clear();
                fragments.extend(vector.fragments());
                debug_assert!(fragments.len() <= MAX_FRAGMENT_COUNT);

                writer.write_all(&[fragments.len() as u8])?;
                write_fragments(writer, &fragments)?;

                if self.verbose {
                    info!(offset, value, fragments = ?FragmentBits(&fragments), "encoded byte");
                }

                stats.units += 1;
                stats.bytes_read += 1;
                stats.fragments += fragments.len() as u64;
                stats.bytes_written += 1 + (fragments.len() * FRAGMENT_SIZE) as u64;
            }

            reader.consume(consumed);
        }

        trace!(?stats, "binary encode finished");
        Ok(stats)
    }

    /// Decode records from `reader`, writing one byte per record to `writer`
    ///
    /// End of stream between records is success; inside a record it is a
    /// truncation error.
    pub fn decode<R: BufRead, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let mut buffer = [Fragment::EMPTY; MAX_FRAGMENT_COUNT];

        loop {
            let offset = stats.bytes_read;

            let mut header = [0u8; 1];
            if read_up_to(reader, &mut header)? == 0 {
                break;
            }
            let declared = header[0];

            let record = &mut buffer[..declared as usize];
            let record_len = declared as usize * FRAGMENT_SIZE;
            let filled = read_up_to(reader, bytemuck::cast_slice_mut(&mut *record))?;
            if filled < record_len {
                return Err(CodecError::Truncated {
                    offset,
                    declared,
                    complete: filled / FRAGMENT_SIZE,
                });
            }

            let value = decode_fragments(record.iter().map(|f| f.le_to_native()), self.table)
                .map_err(|source| CodecError::Record { offset, source })?;
            writer.write_all(&[value])?;

            if self.verbose {
                info!(offset, value, fragments = declared, "decoded record");
            }

            stats.units += 1;
            stats.bytes_read += 1 + record_len as u64;
            stats.fragments += declared as u64;
            stats.bytes_written += 1;
        }

        trace!(?stats, "binary decode finished");
        Ok(stats)
    }
}

/// Write fragments in wire order
fn write_fragments<W: Write>(writer: &mut W, fragments: &[Fragment]) -> io::Result<()> {
    #[cfg(target_endian = "little")]
    {
        writer.write_all(bytemuck::cast_slice(fragments))
    }
    #[cfg(not(target_endian = "little"))]
    {
        for fragment in fragments {
            writer.write_all(&fragment.to_le_bytes())?;
        }
        Ok(())
    }
}

/// Fill `buf` as far as the stream allows, returning the number of bytes read
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Debug view rendering fragments as bit strings
struct FragmentBits<'a>(&'a [Fragment]);

impl core::fmt::Debug for FragmentBits<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|fragment| format!("{fragment:b}")))
            .finish()
    }
}
