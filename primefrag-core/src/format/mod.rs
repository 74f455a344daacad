//! Wire format definitions for primefrag streams
//!
//! This module contains the binary fragment record and the text line format.
//! No I/O happens here; the outer crate drives readers and writers.

pub mod constants;
pub mod fragment;
pub mod text;

// Re-export format definitions
pub use fragment::{Fragment, SetSlots};
pub use text::{parse_line, parse_token, parse_tokens, TextLine};
