//! Text stream codec
//!
//! One line per source byte, rendered from the exponent vector. Every line is
//! `\n` terminated; a final line without a terminator is a truncated stream.

use crate::codec::RunStats;
use crate::error::{CodecError, Result};
use primefrag_core::constants::text::LINE_TERMINATOR;
use primefrag_core::{parse_line, ExponentVector, PrimeTable, TextLine};
use std::io::{BufRead, ErrorKind, Write};
use tracing::{info, trace};

/// Text line encoder/decoder bound to a prime table
#[derive(Debug, Clone, Copy)]
pub struct TextCodec<'t> {
    table: &'t PrimeTable,
    verbose: bool,
}

impl<'t> TextCodec<'t> {
    pub fn new(table: &'t PrimeTable) -> Self {
        Self {
            table,
            verbose: false,
        }
    }

    /// Log every line at info level
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Encode every byte of `reader` as one line on `writer`
    pub fn encode<R: BufRead, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let mut line = String::with_capacity(32);

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

                line.clear();
                line.push_str(&TextLine(&vector).to_string());
                line.push(LINE_TERMINATOR as char);
                writer.write_all(line.as_bytes())?;

                if self.verbose {
                    info!(offset, value, line = line.trim_end(), "encoded byte");
                }

                stats.units += 1;
                stats.bytes_read += 1;
                stats.bytes_written += line.len() as u64;
            }

            reader.consume(consumed);
        }

        trace!(?stats, "text encode finished");
        Ok(stats)
    }

    /// Decode lines from `reader`, writing one byte per line to `writer`
    pub fn decode<R: BufRead, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let mut line = Vec::with_capacity(32);

        loop {
            line.clear();
            let read = reader.read_until(LINE_TERMINATOR, &mut line)?;
            if read == 0 {
                break;
            }
            let number = stats.units as usize + 1;

            let content = line
                .strip_suffix(&[LINE_TERMINATOR])
                .ok_or(CodecError::TruncatedLine { line: number })?;
            let value = parse_line(content, self.table)
                .map_err(|source| CodecError::Line {
                    line: number,
                    source,
                })?;
            writer.write_all(&[value])?;

            if self.verbose {
                info!(line = number, value, "decoded line");
            }

            stats.units += 1;
            stats.bytes_read += read as u64;
            stats.bytes_written += 1;
        }

        trace!(?stats, "text decode finished");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primefrag_core::PrimefragError;
    use std::io::Cursor;

    fn codec() -> TextCodec<'static> {
        TextCodec::new(PrimeTable::standard())
    }

    fn encode(input: &[u8]) -> String {
        let mut output = Vec::new();
        codec().encode(&mut Cursor::new(input), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn decode(input: &str) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        codec().decode(&mut Cursor::new(input.as_bytes()), &mut output)?;
        Ok(output)
    }

    #[test]
    fn test_encode_lines() {
        assert_eq!(encode(&[12]), "1:2;2:1\n");
        assert_eq!(encode(&[0, 1, 2]), "\n0:1\n1:1\n");
        assert_eq!(encode(b"A"), "3:1;6:1\n"); // 65 = 5 * 13
    }

    #[test]
    fn test_decode_lines() {
        assert_eq!(decode("1:2;2:1\n").unwrap(), vec![12]);
        assert_eq!(decode("\n0:1\n1:1\n").unwrap(), vec![0, 1, 2]);
        assert_eq!(decode("1:7\n").unwrap(), vec![128]);
        assert_eq!(decode("1:1\r\n0:1\r\n").unwrap(), vec![2, 1]);
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_error_reports_line_number() {
        match decode("1:1\n\nbogus\n") {
            Err(CodecError::Line { line, source }) => {
                assert_eq!(line, 3);
                assert_eq!(source, PrimefragError::MalformedToken);
            }
            other => panic!("expected line error, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_line_is_truncation() {
        let mut output = Vec::new();
        let result = codec().decode(&mut Cursor::new(&b"1:2;2:1\n1:2"[..]), &mut output);
        match result {
            Err(CodecError::TruncatedLine { line }) => assert_eq!(line, 2),
            other => panic!("expected truncated line, got {other:?}"),
        }
        assert_eq!(output, vec![12]);

        assert!(matches!(decode("1:7"), Err(CodecError::TruncatedLine { line: 1 })));
        assert!(matches!(decode("0:1\r"), Err(CodecError::TruncatedLine { line: 1 })));
    }

    #[test]
    fn test_partial_output_is_kept() {
        let mut output = Vec::new();
        let result = codec().decode(&mut Cursor::new(&b"1:1\n1:9\n"[..]), &mut output);
        assert!(result.is_err());
        assert_eq!(output, vec![2]);
    }

    #[test]
    fn test_stats() {
        let mut output = Vec::new();
        let stats = codec()
            .encode(&mut Cursor::new(&[0u8, 12][..]), &mut output)
            .unwrap();
        assert_eq!(stats.units, 2);
        assert_eq!(stats.bytes_written, output.len() as u64);
        assert_eq!(stats.fragments, 0);
    }
}
