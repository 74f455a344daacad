//! Unary fragment encoding of exponent vectors
//!
//! Encoding peels one unit off every positive slot per pass and records the
//! slots it touched as a [`Fragment`]. A slot with multiplicity `m` therefore
//! appears in the first `m` fragments, and the sequence is as long as the
//! largest multiplicity (at least one fragment, even for byte 0).
//!
//! Decoding multiplies the prime of every set prime slot into an accumulator.
//! The unity slot is tracked separately so bytes 0 and 1 stay distinct.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::format::constants::UNITY_SLOT;
use crate::{ExponentVector, Fragment, PrimeTable, PrimefragError, Result};

/// Fragments for a single byte
#[cfg(feature = "alloc")]
pub type FragmentSequence = Vec<Fragment>;

/// Iterator yielding the fragments of an exponent vector in encounter order
#[derive(Debug, Clone)]
pub struct Fragments {
    remaining: ExponentVector,
    started: bool,
}

impl Fragments {
    pub fn new(vector: ExponentVector) -> Self {
        Self {
            remaining: vector,
            started: false,
        }
    }
}

impl Iterator for Fragments {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        if self.started && self.remaining.is_zero() {
            return None;
        }
        self.started = true;

        let mut fragment = Fragment::EMPTY;
        for (slot, count) in self.remaining.slots_mut().iter_mut().enumerate() {
            if *count > 0 {
                fragment = fragment.with(slot);
                *count -= 1;
            }
        }
        Some(fragment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let passes = self.remaining.max_multiplicity() as usize;
        let n = if self.started { passes } else { passes.max(1) };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Fragments {}

impl core::iter::FusedIterator for Fragments {}

impl ExponentVector {
    /// Unary fragment encoding of this vector
    pub fn fragments(&self) -> Fragments {
        Fragments::new(*self)
    }
}

/// Factor `byte` and collect its fragments
#[cfg(feature = "alloc")]
pub fn encode_byte(byte: u8, table: &PrimeTable) -> Result<FragmentSequence> {
    Ok(ExponentVector::factorize(byte, table)?.fragments().collect())
}

/// Incremental decoder turning a fragment sequence back into a byte
#[derive(Debug, Clone)]
pub struct FragmentDecoder<'t> {
    table: &'t PrimeTable,
    accumulator: u32,
    fragments: usize,
    saw_prime: bool,
    saw_unity: bool,
}

impl<'t> FragmentDecoder<'t> {
    pub fn new(table: &'t PrimeTable) -> Self {
        Self {
            table,
            accumulator: 1,
            fragments: 0,
            saw_prime: false,
            saw_unity: false,
        }
    }

    /// Number of fragments consumed so far
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Fold one fragment into the accumulator
    pub fn push(&mut self, fragment: Fragment) -> Result<()> {
        if fragment.exceeds(self.table.slot_count()) {
            return Err(PrimefragError::InvalidSlot);
        }

        for slot in fragment.slots() {
            if slot == UNITY_SLOT {
                if self.saw_unity {
                    return Err(PrimefragError::UnityConflict);
                }
                self.saw_unity = true;
                continue;
            }

            let prime = self
                .table
                .prime_for_slot(slot)
                .ok_or(PrimefragError::InvalidSlot)? as u32;
            self.accumulator = self
                .accumulator
                .checked_mul(prime)
                .filter(|&value| value <= u8::MAX as u32)
                .ok_or(PrimefragError::AccumulatorOverflow)?;
            self.saw_prime = true;
        }

        if self.saw_unity && self.saw_prime {
            return Err(PrimefragError::UnityConflict);
        }

        self.fragments += 1;
        Ok(())
    }

    /// Resolve the decoded byte
    ///
    /// No bits at all decodes to 0, a lone unity bit to 1, anything else to
    /// the accumulated product.
    pub fn finish(self) -> Result<u8> {
        if self.fragments == 0 {
            return Err(PrimefragError::EmptySequence);
        }
        if self.saw_prime {
            Ok(self.accumulator as u8)
        } else if self.saw_unity {
            Ok(1)
        } else {
            Ok(0)
        }
    }
}

/// Decode a complete fragment sequence
pub fn decode_fragments<I>(fragments: I, table: &PrimeTable) -> Result<u8>
where
    I: IntoIterator<Item = Fragment>,
{
    let mut decoder = FragmentDecoder::new(table);
    for fragment in fragments {
        decoder.push(fragment)?;
    }
    decoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static PrimeTable {
        PrimeTable::standard()
    }

    fn fragments_of(byte: u8) -> Vec<Fragment> {
        ExponentVector::factorize(byte, table())
            .unwrap()
            .fragments()
            .collect()
    }

    #[test]
    fn test_twelve_peels_into_two_fragments() {
        let fragments = fragments_of(12);
        assert_eq!(
            fragments,
            vec![Fragment::EMPTY.with(1).with(2), Fragment::EMPTY.with(1)]
        );
        assert_eq!(decode_fragments(fragments, table()), Ok(12));
    }

    #[test]
    fn test_power_of_two() {
        let fragments = fragments_of(128);
        assert_eq!(fragments.len(), 7);
        assert!(fragments.iter().all(|&f| f == Fragment::EMPTY.with(1)));
    }

    #[test]
    fn test_zero_and_one() {
        assert_eq!(fragments_of(0), vec![Fragment::EMPTY]);
        assert_eq!(fragments_of(1), vec![Fragment::UNITY]);
        assert_eq!(decode_fragments([Fragment::EMPTY], table()), Ok(0));
        assert_eq!(decode_fragments([Fragment::UNITY], table()), Ok(1));
    }

    #[test]
    fn test_length_matches_max_multiplicity() {
        for byte in 0..=255u8 {
            let vector = ExponentVector::factorize(byte, table()).unwrap();
            let fragments = vector.fragments();
            let expected = (vector.max_multiplicity() as usize).max(1);
            assert_eq!(fragments.len(), expected, "byte {byte}");
            assert_eq!(fragments.count(), expected, "byte {byte}");
        }
    }

    #[test]
    fn test_slot_appears_in_leading_fragments() {
        // 72 = 2^3 * 3^2
        let fragments = fragments_of(72);
        let twos: Vec<bool> = fragments.iter().map(|f| f.contains(1)).collect();
        let threes: Vec<bool> = fragments.iter().map(|f| f.contains(2)).collect();
        assert_eq!(twos, vec![true, true, true]);
        assert_eq!(threes, vec![true, true, false]);
    }

    #[test]
    fn test_every_byte_round_trips() {
        for byte in 0..=255u8 {
            let encoded = fragments_of(byte);
            assert_eq!(decode_fragments(encoded, table()), Ok(byte), "byte {byte}");
        }
    }

    #[test]
    fn test_decoder_rejects_overflow() {
        let big = Fragment::EMPTY.with(54); // 251
        assert_eq!(
            decode_fragments([big, big], table()),
            Err(PrimefragError::AccumulatorOverflow)
        );
        let two = Fragment::EMPTY.with(1);
        assert_eq!(
            decode_fragments([two; 8], table()),
            Err(PrimefragError::AccumulatorOverflow)
        );
    }

    #[test]
    fn test_decoder_rejects_unknown_slots() {
        assert_eq!(
            decode_fragments([Fragment::EMPTY.with(55)], table()),
            Err(PrimefragError::InvalidSlot)
        );
        assert_eq!(
            decode_fragments([Fragment::EMPTY.with(63)], table()),
            Err(PrimefragError::InvalidSlot)
        );
    }

    #[test]
    fn test_decoder_unity_rules() {
        assert_eq!(
            decode_fragments([Fragment::UNITY.with(1)], table()),
            Err(PrimefragError::UnityConflict)
        );
        assert_eq!(
            decode_fragments([Fragment::UNITY, Fragment::UNITY], table()),
            Err(PrimefragError::UnityConflict)
        );
        assert_eq!(
            decode_fragments([Fragment::EMPTY.with(2), Fragment::UNITY], table()),
            Err(PrimefragError::UnityConflict)
        );
    }

    #[test]
    fn test_decoder_rejects_empty_sequence() {
        assert_eq!(
            decode_fragments(core::iter::empty(), table()),
            Err(PrimefragError::EmptySequence)
        );
    }
}
