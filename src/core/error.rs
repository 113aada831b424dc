use thiserror::Error;

/// Errors that can occur while configuring or generating an export.
///
/// Every variant leaves the export job in `Draft` with no stored
/// artifact; generation is all-or-nothing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Missing or contradictory configuration, caught before any output
    /// is produced.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The export filter matched no journal entries.
    #[error("no journal entries match the export criteria")]
    NoMatchingRecords,

    /// A numeric value does not fit its fixed-width field. Numeric
    /// truncation is never silently accepted.
    #[error("numeric value '{value}' exceeds the {width}-character width of field '{field}'")]
    FieldOverflow {
        field: &'static str,
        value: String,
        width: usize,
    },

    /// One or more journal entries are already claimed by another export
    /// job.
    #[error("journal entries already claimed by another export: {0:?}")]
    AlreadyClaimed(Vec<i64>),

    /// A state-machine transition was requested from the wrong state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Error reported by an underlying format writer (CSV, XLSX, ZIP).
    #[error("codec error: {0}")]
    Codec(String),

    /// Error reported by the record provider.
    #[error("provider error: {0}")]
    Provider(String),
}
