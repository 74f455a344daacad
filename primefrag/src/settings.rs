//! Run configuration
//!
//! [`RunSettings`] carries everything a run needs: where to read, where to
//! write, which direction and which wire format.

use crate::error::{CodecError, Result};
use std::path::{Path, PathBuf};

/// Transformation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    #[default]
    Encode,
    Decode,
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Direction::Encode => write!(f, "encode"),
            Direction::Decode => write!(f, "decode"),
        }
    }
}

/// Wire format of the encoded side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Format {
    /// Count byte followed by 64-bit fragments
    #[default]
    Binary,
    /// One `index:count` line per byte
    Ascii,
}

impl core::fmt::Display for Format {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Format::Binary => write!(f, "binary"),
            Format::Ascii => write!(f, "ascii"),
        }
    }
}

/// Configuration for a single transcoding run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSettings {
    /// File to read
    pub input: PathBuf,
    /// File to create or truncate
    pub output: PathBuf,
    pub direction: Direction,
    pub format: Format,
    /// Log every processed unit
    pub verbose: bool,
}

impl RunSettings {
    /// Create settings for encoding `input` into `output` in binary format
    pub fn new<I: AsRef<Path>, O: AsRef<Path>>(input: I, output: O) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Set the direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the wire format
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable per-unit logging
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether both paths are present
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check that the settings describe a runnable transformation
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(CodecError::InvalidSettings("input path is required"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(CodecError::InvalidSettings("output path is required"));
        }
        // Creating the output would truncate the input before it is read
        if self.input == self.output {
            return Err(CodecError::InvalidSettings(
                "input and output must be different files",
            ));
        }
        Ok(())
    }
}
