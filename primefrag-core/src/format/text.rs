//! Text line format
//!
//! Each source byte becomes one line. A line is either empty (byte 0) or a
//! `;`-delimited list of `index:count` tokens, where `index` is an exponent
//! vector slot and `count` its positive multiplicity.

use super::constants::text::{INDEX_SEPARATOR, PAIR_DELIMITER};
use super::constants::UNITY_SLOT;
use crate::{ExponentVector, PrimeTable, PrimefragError, Result};

/// Renders an exponent vector as a text line (without the terminator)
#[derive(Debug, Clone, Copy)]
pub struct TextLine<'a>(pub &'a ExponentVector);

impl core::fmt::Display for TextLine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (position, (slot, count)) in self.0.pairs().enumerate() {
            if position > 0 {
                write!(f, "{}", PAIR_DELIMITER as char)?;
            }
            write!(f, "{slot}{}{count}", INDEX_SEPARATOR as char)?;
        }
        Ok(())
    }
}

/// Split a non-empty line into `(index, count)` tokens
pub fn parse_tokens(line: &[u8]) -> impl Iterator<Item = Result<(usize, u32)>> + '_ {
    line.split(|&b| b == PAIR_DELIMITER).map(parse_token)
}

/// Parse a single `index:count` token
pub fn parse_token(token: &[u8]) -> Result<(usize, u32)> {
    let separator = token
        .iter()
        .position(|&b| b == INDEX_SEPARATOR)
        .ok_or(PrimefragError::MalformedToken)?;

    let index = parse_decimal(&token[..separator])?;
    let count = parse_decimal(&token[separator + 1..])?;
    let count = u32::try_from(count).map_err(|_| PrimefragError::AccumulatorOverflow)?;

    if count == 0 {
        return Err(PrimefragError::ZeroMultiplicity);
    }

    Ok((index, count))
}

/// Decode one line (terminator already stripped) back into its byte
///
/// A trailing carriage return is ignored.
pub fn parse_line(line: &[u8], table: &PrimeTable) -> Result<u8> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() {
        return Ok(0);
    }

    let mut accumulator: u32 = 1;
    let mut saw_unity = false;
    let mut saw_prime = false;

    for token in parse_tokens(line) {
        let (slot, count) = token?;

        if slot >= table.slot_count() {
            return Err(PrimefragError::InvalidSlot);
        }

        if slot == UNITY_SLOT {
            if saw_unity || count != 1 {
                return Err(PrimefragError::UnityConflict);
            }
            saw_unity = true;
        } else {
            let prime = table
                .prime_for_slot(slot)
                .ok_or(PrimefragError::InvalidSlot)? as u32;
            let factor = prime
                .checked_pow(count)
                .ok_or(PrimefragError::AccumulatorOverflow)?;
            accumulator = accumulator
                .checked_mul(factor)
                .filter(|&value| value <= u8::MAX as u32)
                .ok_or(PrimefragError::AccumulatorOverflow)?;
            saw_prime = true;
        }

        if saw_unity && saw_prime {
            return Err(PrimefragError::UnityConflict);
        }
    }

    Ok(accumulator as u8)
}

/// Parse a run of ASCII digits without sign or whitespace
fn parse_decimal(digits: &[u8]) -> Result<usize> {
    if digits.is_empty() {
        return Err(PrimefragError::MalformedToken);
    }

    let mut result: usize = 0;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(PrimefragError::MalformedToken);
        }
        let digit = (byte - b'0') as usize;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(PrimefragError::AccumulatorOverflow)?;
    }

    Ok(result)
}
