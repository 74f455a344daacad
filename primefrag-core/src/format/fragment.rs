//! Fixed-width fragment record
//!
//! A fragment is a 64-bit set over exponent vector slots. On the wire each
//! fragment occupies [`FRAGMENT_SIZE`] bytes, little-endian.

use super::constants::{FRAGMENT_BITS, FRAGMENT_SIZE, UNITY_SLOT};

/// One peeling pass over an exponent vector
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Fragment(u64);

impl Fragment {
    /// Fragment with no slots set (the encoding of byte 0)
    pub const EMPTY: Fragment = Fragment(0);

    /// Fragment with only the unity slot set (the encoding of byte 1)
    pub const UNITY: Fragment = Fragment(1 << UNITY_SLOT);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether `slot` is set; slots past the fragment width are never set
    pub const fn contains(self, slot: usize) -> bool {
        slot < FRAGMENT_BITS && self.0 & (1u64 << slot) != 0
    }

    /// Copy of this fragment with `slot` set; slots past the fragment width
    /// leave it unchanged
    pub const fn with(self, slot: usize) -> Self {
        if slot < FRAGMENT_BITS {
            Self(self.0 | (1u64 << slot))
        } else {
            self
        }
    }

    /// Whether any slot at or above `slot_count` is set
    pub const fn exceeds(self, slot_count: usize) -> bool {
        slot_count < FRAGMENT_BITS && self.0 >> slot_count != 0
    }

    /// Number of slots set
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Set slots in ascending order
    pub fn slots(self) -> SetSlots {
        SetSlots { remaining: self.0 }
    }

    /// Serialize for the binary stream
    pub const fn to_le_bytes(self) -> [u8; FRAGMENT_SIZE] {
        self.0.to_le_bytes()
    }

    /// Deserialize from the binary stream
    pub const fn from_le_bytes(bytes: [u8; FRAGMENT_SIZE]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Reinterpret a fragment whose bytes were read verbatim from the stream
    pub const fn le_to_native(self) -> Self {
        Self(u64::from_le(self.0))
    }
}

impl core::fmt::Binary for Fragment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Binary::fmt(&self.0, f)
    }
}

/// Iterator over the set slots of a fragment
#[derive(Debug, Clone)]
pub struct SetSlots {
    remaining: u64,
}

impl Iterator for SetSlots {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.remaining.trailing_zeros() as usize;
        self.remaining &= self.remaining - 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SetSlots {}
