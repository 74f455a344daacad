//! Error types for primefrag operations

/// Errors that can occur while factoring, fragmenting or parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimefragError {
    /// Prime table bound exceeds the byte range
    InvalidBound,
    /// Factorization left a remainder the prime table cannot cover
    IncompleteFactorization,
    /// Decoded product left the byte range
    AccumulatorOverflow,
    /// Slot index outside the exponent vector
    InvalidSlot,
    /// Unity slot repeated or combined with prime factors
    UnityConflict,
    /// Fragment sequence with no fragments
    EmptySequence,
    /// Text token does not match `index:count`
    MalformedToken,
    /// Text token with a zero multiplicity
    ZeroMultiplicity,
}

/// Broad classification of a [`PrimefragError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Encoded data is damaged or was not produced by the encoder
    Corruption,
    /// An invariant of the codec itself was violated
    InternalConsistency,
    /// The codec was configured with unusable parameters
    Configuration,
}

impl PrimefragError {
    /// Classify the error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            PrimefragError::InvalidBound => ErrorCategory::Configuration,
            PrimefragError::IncompleteFactorization | PrimefragError::AccumulatorOverflow => {
                ErrorCategory::InternalConsistency
            }
            PrimefragError::InvalidSlot
            | PrimefragError::UnityConflict
            | PrimefragError::EmptySequence
            | PrimefragError::MalformedToken
            | PrimefragError::ZeroMultiplicity => ErrorCategory::Corruption,
        }
    }
}

impl core::fmt::Display for PrimefragError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            PrimefragError::InvalidBound => "Prime table bound must not exceed 255",
            PrimefragError::IncompleteFactorization => {
                "Factorization did not terminate at 1 for an in-range byte"
            }
            PrimefragError::AccumulatorOverflow => "Decoded value exceeds the byte range",
            PrimefragError::InvalidSlot => "Slot index outside the exponent vector",
            PrimefragError::UnityConflict => "Unity slot repeated or mixed with prime factors",
            PrimefragError::EmptySequence => "Fragment sequence is empty",
            PrimefragError::MalformedToken => "Malformed index:count token",
            PrimefragError::ZeroMultiplicity => "Token multiplicity must be positive",
        };
        write!(f, "{msg}")
    }
}

impl core::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ErrorCategory::Corruption => write!(f, "corruption"),
            ErrorCategory::InternalConsistency => write!(f, "internal consistency"),
            ErrorCategory::Configuration => write!(f, "configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PrimefragError {}

/// Result type for primefrag operations
pub type Result<T> = core::result::Result<T, PrimefragError>;
