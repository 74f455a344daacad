//! Primefrag - byte codec built on prime factorization
//!
//! Every byte of a file is factored over the primes below 255 and written
//! either as binary fragment records or as a human-readable text line. Both
//! formats decode back to the original bytes exactly.
//!
//! ## Architecture
//!
//! - **primefrag-core**: prime table, factorization and wire formats (no I/O)
//! - **primefrag**: stream codecs, run settings, file handling and the CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use primefrag::{run, Direction, Format, RunSettings};
//!
//! fn example() -> Result<(), primefrag::CodecError> {
//!     let settings = RunSettings::new("photo.jpg", "photo.pf").with_format(Format::Ascii);
//!     let report = run(&settings)?;
//!     println!("encoded {} bytes", report.stats.units);
//!
//!     let back = RunSettings::new("photo.pf", "photo.out.jpg")
//!         .with_direction(Direction::Decode)
//!         .with_format(Format::Ascii);
//!     run(&back)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Formats
//!
//! - **Binary**: `[count: u8][count x u64 LE fragment]` per byte
//! - **Text**: one `index:count;index:count` line per byte, empty for byte 0

// Re-export core abstractions and format definitions
pub use primefrag_core::{
    // Algorithms
    decode_fragments, encode_byte, ExponentVector, FragmentDecoder, Fragments, PrimeTable,
    // Format definitions
    Fragment, FragmentSequence, TextLine,
    // Error handling
    ErrorCategory, PrimefragError,
};

// Implementation modules
pub mod binary;
pub mod codec;
pub mod error;
pub mod input;
#[cfg(feature = "serde")]
pub mod report;
pub mod settings;
pub mod text;

// Public exports
pub use binary::BinaryCodec;
pub use codec::{run, transcode, RunReport, RunStats, Transcoder};
pub use error::{CodecError, Result};
pub use input::Input;
pub use settings::{Direction, Format, RunSettings};
pub use text::TextCodec;

#[cfg(feature = "serde")]
pub use report::{inspect_json, ByteReport, FactorEntry, ReportError};
