//! Format constants for the primefrag wire formats

/// Exclusive upper limit for primes in the standard table
pub const BOUND: u16 = 255;

/// Largest bound a prime table may be built with
pub const MAX_BOUND: u16 = 255;

/// Width of a fragment in bits; one bit per exponent vector slot
pub const FRAGMENT_BITS: usize = 64;

/// Size of a serialized fragment in bytes
pub const FRAGMENT_SIZE: usize = FRAGMENT_BITS / 8;

/// Maximum number of exponent vector slots a fragment can address
pub const MAX_SLOTS: usize = FRAGMENT_BITS;

/// Slot reserved for the value 1
pub const UNITY_SLOT: usize = 0;

/// Largest fragment count a binary record header can declare
pub const MAX_FRAGMENT_COUNT: usize = u8::MAX as usize;

/// Text format constants
pub mod text {
    /// Separates `index:count` tokens on a line
    pub const PAIR_DELIMITER: u8 = b';';

    /// Separates the slot index from its count inside a token
    pub const INDEX_SEPARATOR: u8 = b':';

    /// Terminates every encoded line
    pub const LINE_TERMINATOR: u8 = b'\n';
}
