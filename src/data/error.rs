use thiserror::Error;

/// Typed failures of the dataset layer.
///
/// Everything else (I/O, decoding) travels as `anyhow::Error` with context;
/// these variants are the conditions callers may want to match on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("required column '{0}' not found")]
    MissingColumn(&'static str),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("no valid (startYear, genres) rows after normalization")]
    NoValidRows,
}
