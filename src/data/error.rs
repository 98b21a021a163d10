use thiserror::Error;

/// Schema and value problems found while building a [`LaunchDataset`].
///
/// [`LaunchDataset`]: super::model::LaunchDataset
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("dataset contains no launch records")]
    Empty,
}
