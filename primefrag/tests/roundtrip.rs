//! Round-trip and corruption tests across both wire formats

use primefrag::{
    run, transcode, CodecError, Direction, ErrorCategory, Format, PrimefragError, RunSettings,
};
use rand::{Rng, SeedableRng};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

fn encode(format: Format, data: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::new();
    transcode(Direction::Encode, format, &mut Cursor::new(data), &mut encoded).unwrap();
    encoded
}

fn decode(format: Format, data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut decoded = Vec::new();
    transcode(Direction::Decode, format, &mut Cursor::new(data), &mut decoded)?;
    Ok(decoded)
}

#[test]
fn test_every_byte_round_trips_in_both_formats() {
    for format in [Format::Binary, Format::Ascii] {
        for byte in 0..=255u8 {
            let encoded = encode(format, &[byte]);
            assert_eq!(decode(format, &encoded).unwrap(), vec![byte], "{format} {byte}");
        }
    }
}

#[test]
fn test_random_data_round_trips() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
    let mut data = vec![0u8; 64 * 1024];
    rng.fill(&mut data[..]);

    for format in [Format::Binary, Format::Ascii] {
        let encoded = encode(format, &data);
        assert!(encoded.len() > data.len());
        assert_eq!(decode(format, &encoded).unwrap(), data, "{format}");
    }
}

#[test]
fn test_binary_record_sizes() {
    // 0 and 1 cost one fragment, 128 = 2^7 costs seven
    assert_eq!(encode(Format::Binary, &[0]).len(), 9);
    assert_eq!(encode(Format::Binary, &[1]).len(), 9);
    assert_eq!(encode(Format::Binary, &[128]).len(), 1 + 7 * 8);
    assert_eq!(encode(Format::Binary, &[12]).len(), 1 + 2 * 8);
}

#[test]
fn test_text_stream_shape() {
    let encoded = encode(Format::Ascii, &[0, 1, 12, 0]);
    assert_eq!(String::from_utf8(encoded).unwrap(), "\n0:1\n1:2;2:1\n\n");
}

#[test]
fn test_every_truncation_point_fails() {
    let encoded = encode(Format::Binary, &[12, 128, 0, 1, 250]);
    let boundaries = [0, 17, 17 + 57, 17 + 57 + 9, 17 + 57 + 18, encoded.len()];

    for cut in 0..encoded.len() {
        let result = decode(Format::Binary, &encoded[..cut]);
        if boundaries.contains(&cut) {
            assert!(result.is_ok(), "cut at record boundary {cut}");
        } else {
            let err = result.unwrap_err();
            assert!(matches!(err, CodecError::Truncated { .. }), "cut {cut}: {err}");
            assert_eq!(err.category(), Some(ErrorCategory::Corruption));
        }
    }
}

#[test]
fn test_every_text_cut_inside_a_line_fails() {
    let encoded = encode(Format::Ascii, &[12, 128, 0, 1, 250]);
    let boundaries: Vec<usize> = std::iter::once(0)
        .chain(
            encoded
                .iter()
                .enumerate()
                .filter(|(_, b)| **b == b'\n')
                .map(|(i, _)| i + 1),
        )
        .collect();
    assert_eq!(boundaries.len(), 6);

    for cut in 0..=encoded.len() {
        let result = decode(Format::Ascii, &encoded[..cut]);
        let complete = boundaries.iter().filter(|&&b| b != 0 && b <= cut).count();
        if boundaries.contains(&cut) {
            assert_eq!(result.unwrap().len(), complete, "cut at line boundary {cut}");
        } else {
            let err = result.unwrap_err();
            match &err {
                CodecError::TruncatedLine { line } => assert_eq!(*line, complete + 1, "cut {cut}"),
                other => panic!("cut {cut}: {other}"),
            }
            assert_eq!(err.category(), Some(ErrorCategory::Corruption));
        }
    }
}

#[test]
fn test_overflowing_record_is_rejected() {
    let mut record = vec![2u8];
    let slot_251 = 1u64 << 54;
    record.extend_from_slice(&slot_251.to_le_bytes());
    record.extend_from_slice(&slot_251.to_le_bytes());

    let err = decode(Format::Binary, &record).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Record {
            offset: 0,
            source: PrimefragError::AccumulatorOverflow
        }
    ));
    assert_eq!(err.category(), Some(ErrorCategory::InternalConsistency));
}

#[test]
fn test_file_run_round_trip() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("original.bin");
    let encoded = dir.path().join("encoded.txt");
    let decoded = dir.path().join("decoded.bin");

    let data: Vec<u8> = (0..=255u8).rev().chain(0..=255).collect();
    fs::write(&original, &data).unwrap();

    let report = run(&RunSettings::new(&original, &encoded).with_format(Format::Ascii)).unwrap();
    assert_eq!(report.stats.units, data.len() as u64);
    assert_eq!(report.direction, Direction::Encode);

    let report = run(&RunSettings::new(&encoded, &decoded)
        .with_direction(Direction::Decode)
        .with_format(Format::Ascii))
    .unwrap();
    assert_eq!(report.stats.bytes_written, data.len() as u64);
    assert_eq!(fs::read(&decoded).unwrap(), data);
}

#[test]
fn test_file_run_with_empty_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty");
    let output = dir.path().join("empty.pf");
    fs::write(&input, b"").unwrap();

    let report = run(&RunSettings::new(&input, &output)).unwrap();
    assert_eq!(report.stats.units, 0);
    assert!(fs::read(&output).unwrap().is_empty());
}

#[test]
fn test_file_run_keeps_partial_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("damaged.pf");
    let output = dir.path().join("damaged.out");

    let mut encoded = encode(Format::Binary, &[7, 12]);
    encoded.truncate(encoded.len() - 4);
    fs::write(&input, &encoded).unwrap();

    let result = run(&RunSettings::new(&input, &output).with_direction(Direction::Decode));
    assert!(matches!(result, Err(CodecError::Truncated { .. })));
    assert_eq!(fs::read(&output).unwrap(), vec![7]);
}

#[test]
fn test_file_run_missing_input() {
    let dir = TempDir::new().unwrap();
    let result = run(&RunSettings::new(
        dir.path().join("nope"),
        dir.path().join("out"),
    ));
    assert!(matches!(result, Err(CodecError::OpenInput { .. })));
    assert!(!dir.path().join("out").exists());
}
