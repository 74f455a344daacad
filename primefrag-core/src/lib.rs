#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! Primefrag Core - prime factorization fragment format definitions
//!
//! This crate provides the prime table, byte factorization and the fragment
//! and text encodings used by primefrag streams. It performs no I/O.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod factor;
pub mod format;
pub mod fragments;
pub mod primes;

pub use error::*;
pub use factor::ExponentVector;
pub use format::*;
pub use fragments::{decode_fragments, FragmentDecoder, Fragments};
#[cfg(feature = "alloc")]
pub use fragments::{encode_byte, FragmentSequence};
pub use primes::PrimeTable;
