//! Prime table shared by every codec component
//!
//! The table is built by trial division at compile time and is never mutated.
//! Components borrow it rather than reaching for a global.

use crate::format::constants::{BOUND, MAX_BOUND, MAX_SLOTS, UNITY_SLOT};
use crate::{PrimefragError, Result};

/// Number of primes the table can hold (one slot is reserved for unity)
const CAPACITY: usize = MAX_SLOTS - 1;

static STANDARD: PrimeTable = match PrimeTable::new(BOUND) {
    Ok(table) => table,
    Err(_) => panic!("standard prime table bound exceeds the byte range"),
};

/// Ordered primes strictly below a bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeTable {
    primes: [u8; CAPACITY],
    len: usize,
    bound: u16,
}

impl PrimeTable {
    /// Generate all primes `p` with `2 <= p < bound`, ascending
    pub const fn new(bound: u16) -> Result<Self> {
        if bound > MAX_BOUND {
            return Err(PrimefragError::InvalidBound);
        }

        let mut primes = [0u8; CAPACITY];
        let mut len = 0;
        let mut candidate: u16 = 2;

        while candidate < bound {
            let mut is_prime = true;
            let mut i = 0;
            while i < len {
                let prime = primes[i] as u16;
                if prime * prime > candidate {
                    break;
                }
                if candidate % prime == 0 {
                    is_prime = false;
                    break;
                }
                i += 1;
            }

            if is_prime {
                primes[len] = candidate as u8;
                len += 1;
            }
            candidate += 1;
        }

        Ok(Self { primes, len, bound })
    }

    /// The process-wide table of primes below 255
    pub fn standard() -> &'static PrimeTable {
        &STANDARD
    }

    /// Number of primes in the table
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exclusive bound the table was generated with
    pub const fn bound(&self) -> u16 {
        self.bound
    }

    /// Exponent vector length: one slot per prime plus the unity slot
    pub const fn slot_count(&self) -> usize {
        self.len + 1
    }

    /// All primes, ascending
    pub fn primes(&self) -> &[u8] {
        &self.primes[..self.len]
    }

    /// Prime at `index`
    pub fn prime(&self, index: usize) -> Option<u8> {
        self.primes().get(index).copied()
    }

    /// Prime addressed by an exponent vector slot, `None` for unity or out of range
    pub fn prime_for_slot(&self, slot: usize) -> Option<u8> {
        if slot == UNITY_SLOT {
            return None;
        }
        self.prime(slot - 1)
    }

    /// Exponent vector slot holding the multiplicity of `prime`
    pub fn slot_of(&self, prime: u8) -> Option<usize> {
        self.primes().binary_search(&prime).ok().map(|index| index + 1)
    }
}

impl Default for PrimeTable {
    fn default() -> Self {
        STANDARD.clone()
    }
}
