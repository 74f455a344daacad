//! Serializable per-byte inspection reports

use primefrag_core::constants::FRAGMENT_SIZE;
use primefrag_core::{ExponentVector, PrimeTable, PrimefragError, TextLine};
use serde::Serialize;

/// One non-zero exponent vector slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorEntry {
    pub slot: usize,
    /// `None` for the unity slot
    pub prime: Option<u8>,
    pub count: u8,
}

/// Everything the codec derives from a single byte
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ByteReport {
    pub value: u8,
    pub factors: Vec<FactorEntry>,
    /// Fragments as bit strings, one character per slot, highest slot first
    pub fragments: Vec<String>,
    /// Text line without the terminator
    pub text: String,
    /// Size of the binary record in bytes
    pub binary_len: usize,
}

impl ByteReport {
    pub fn new(value: u8, table: &PrimeTable) -> Result<Self, PrimefragError> {
        let vector = ExponentVector::factorize(value, table)?;
        let width = table.slot_count();

        let factors = vector
            .pairs()
            .map(|(slot, count)| FactorEntry {
                slot,
                prime: table.prime_for_slot(slot),
                count,
            })
            .collect();

        let fragments: Vec<String> = vector
            .fragments()
            .map(|fragment| format!("{fragment:0width$b}"))
            .collect();
        let binary_len = 1 + fragments.len() * FRAGMENT_SIZE;

        Ok(Self {
            value,
            factors,
            fragments,
            text: TextLine(&vector).to_string(),
            binary_len,
        })
    }
}

/// Failure while building or serializing inspection reports
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot factor byte: {0}")]
    Factor(#[from] PrimefragError),
    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render reports for `values` as pretty JSON
pub fn inspect_json(values: &[u8], table: &PrimeTable) -> Result<String, ReportError> {
    let reports = values
        .iter()
        .map(|&value| ByteReport::new(value, table))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_string_pretty(&reports)?)
}
