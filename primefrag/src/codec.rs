//! Run orchestration
//!
//! [`Transcoder`] dispatches a reader/writer pair to the binary or text codec.
//! [`run`] wraps it with file handling: the input is opened, the output is
//! created, and both are released on every exit path. Output written before a
//! failure is left in place.

use crate::binary::BinaryCodec;
use crate::error::{CodecError, Result};
use crate::input::Input;
use crate::settings::{Direction, Format, RunSettings};
use crate::text::TextCodec;
use primefrag_core::PrimeTable;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Counters collected during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunStats {
    /// Bytes, records or lines processed
    pub units: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Fragments written or read (binary format only)
    pub fragments: u64,
}

/// Outcome of a successful file run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub direction: Direction,
    pub format: Format,
    pub stats: RunStats,
}

/// Direction and format bound to a prime table
#[derive(Debug, Clone, Copy)]
pub struct Transcoder<'t> {
    table: &'t PrimeTable,
    direction: Direction,
    format: Format,
    verbose: bool,
}

impl<'t> Transcoder<'t> {
    pub fn new(table: &'t PrimeTable, direction: Direction, format: Format) -> Self {
        Self {
            table,
            direction,
            format,
            verbose: false,
        }
    }

    /// Take direction, format and verbosity from `settings`
    pub fn from_settings(table: &'t PrimeTable, settings: &RunSettings) -> Self {
        Self::new(table, settings.direction, settings.format).with_verbose(settings.verbose)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Transform everything `reader` yields into `writer`
    pub fn transcode<R: BufRead, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<RunStats> {
        match (self.direction, self.format) {
            (Direction::Encode, Format::Binary) => self.binary().encode(reader, writer),
            (Direction::Decode, Format::Binary) => self.binary().decode(reader, writer),
            (Direction::Encode, Format::Ascii) => self.text().encode(reader, writer),
            (Direction::Decode, Format::Ascii) => self.text().decode(reader, writer),
        }
    }

    fn binary(&self) -> BinaryCodec<'t> {
        BinaryCodec::new(self.table).with_verbose(self.verbose)
    }

    fn text(&self) -> TextCodec<'t> {
        TextCodec::new(self.table).with_verbose(self.verbose)
    }
}

/// In-memory transformation with the standard prime table
pub fn transcode<R: BufRead, W: Write>(
    direction: Direction,
    format: Format,
    reader: &mut R,
    writer: &mut W,
) -> Result<RunStats> {
    Transcoder::new(PrimeTable::standard(), direction, format).transcode(reader, writer)
}

/// Execute a file-to-file run described by `settings`
pub fn run(settings: &RunSettings) -> Result<RunReport> {
    settings.validate()?;
    debug!(
        input = %settings.input.display(),
        output = %settings.output.display(),
        direction = %settings.direction,
        format = %settings.format,
        "starting run"
    );

    let mut reader = Input::open(&settings.input)?;
    let file = File::create(&settings.output).map_err(|source| CodecError::CreateOutput {
        path: settings.output.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let transcoder = Transcoder::from_settings(PrimeTable::standard(), settings);
    let stats = match transcoder.transcode(&mut reader, &mut writer) {
        Ok(stats) => stats,
        Err(e) => {
            warn!(error = %e, "run aborted");
            return Err(e);
        }
    };
    writer.flush()?;

    info!(
        units = stats.units,
        bytes_read = stats.bytes_read,
        bytes_written = stats.bytes_written,
        "{} ({}) finished",
        settings.direction,
        settings.format
    );

    Ok(RunReport {
        input: settings.input.clone(),
        output: settings.output.clone(),
        direction: settings.direction,
        format: settings.format,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_dispatch_round_trip() {
        let data: Vec<u8> = (0..=255).collect();
        for format in [Format::Binary, Format::Ascii] {
            let mut encoded = Vec::new();
            transcode(Direction::Encode, format, &mut Cursor::new(&data), &mut encoded).unwrap();

            let mut decoded = Vec::new();
            transcode(Direction::Decode, format, &mut Cursor::new(&encoded), &mut decoded).unwrap();
            assert_eq!(decoded, data, "format {format}");
        }
    }

    #[test]
    fn test_formats_are_not_interchangeable() {
        let mut encoded = Vec::new();
        let mut input = Cursor::new(&[12u8]);
        transcode(Direction::Encode, Format::Ascii, &mut input, &mut encoded).unwrap();

        let mut decoded = Vec::new();
        let mut input = Cursor::new(&encoded);
        let result = transcode(Direction::Decode, Format::Binary, &mut input, &mut decoded);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_rejects_invalid_settings() {
        assert!(matches!(
            run(&RunSettings::default()),
            Err(CodecError::InvalidSettings(_))
        ));
    }
}
