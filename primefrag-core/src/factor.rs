//! Exponent vectors and byte factorization
//!
//! An exponent vector holds one slot per prime in the table plus a leading
//! unity slot. Slot 0 is set only for the byte 1; slot `i + 1` counts how many
//! times `prime[i]` divides the byte.

use crate::format::constants::{MAX_SLOTS, UNITY_SLOT};
use crate::{PrimeTable, PrimefragError, Result};

/// Per-byte multiplicities, indexed by exponent vector slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentVector {
    slots: [u8; MAX_SLOTS],
    len: usize,
}

impl ExponentVector {
    /// All-zero vector sized for `table`
    pub fn zeroed(table: &PrimeTable) -> Self {
        Self {
            slots: [0; MAX_SLOTS],
            len: table.slot_count(),
        }
    }

    /// Build a vector from raw slot counts
    pub fn from_slots(counts: &[u8]) -> Result<Self> {
        if counts.len() > MAX_SLOTS {
            return Err(PrimefragError::InvalidSlot);
        }
        let mut slots = [0; MAX_SLOTS];
        slots[..counts.len()].copy_from_slice(counts);
        Ok(Self {
            slots,
            len: counts.len(),
        })
    }

    /// Factor `byte` against the primes in `table`
    ///
    /// Byte 0 yields the all-zero vector and byte 1 sets only the unity slot.
    /// Any other byte must factor completely over the table; a leftover
    /// remainder means the table bound does not cover the byte.
    pub fn factorize(byte: u8, table: &PrimeTable) -> Result<Self> {
        let mut vector = Self::zeroed(table);

        match byte {
            0 => return Ok(vector),
            1 => {
                vector.slots[UNITY_SLOT] = 1;
                return Ok(vector);
            }
            _ => {}
        }

        let mut remaining = byte;
        for (index, &prime) in table.primes().iter().enumerate() {
            if remaining == 1 {
                break;
            }
            while remaining % prime == 0 {
                remaining /= prime;
                vector.slots[index + 1] += 1;
            }
        }

        if remaining != 1 {
            return Err(PrimefragError::IncompleteFactorization);
        }

        Ok(vector)
    }

    /// Number of slots, including unity
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot counts in order
    pub fn slots(&self) -> &[u8] {
        &self.slots[..self.len]
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [u8] {
        &mut self.slots[..self.len]
    }

    /// Count stored in `slot`
    pub fn get(&self, slot: usize) -> Option<u8> {
        self.slots().get(slot).copied()
    }

    /// Whether the unity slot is set
    pub fn is_unity(&self) -> bool {
        self.get(UNITY_SLOT).unwrap_or(0) > 0
    }

    /// Whether every slot is zero (the encoding of byte 0)
    pub fn is_zero(&self) -> bool {
        self.slots().iter().all(|&count| count == 0)
    }

    /// Largest count across all slots
    pub fn max_multiplicity(&self) -> u8 {
        self.slots().iter().copied().max().unwrap_or(0)
    }

    /// Non-zero `(slot, count)` pairs in slot order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.slots()
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(slot, &count)| (slot, count))
    }

    /// Value the vector represents under `table`
    ///
    /// Returns `None` if the vector addresses slots outside the table or the
    /// product overflows `u32`.
    pub fn product(&self, table: &PrimeTable) -> Option<u32> {
        if self.is_zero() {
            return Some(0);
        }

        let mut product: u32 = 1;
        for (slot, count) in self.pairs() {
            if slot == UNITY_SLOT {
                continue;
            }
            let prime = table.prime_for_slot(slot)? as u32;
            product = product.checked_mul(prime.checked_pow(count as u32)?)?;
        }
        Some(product)
    }
}
