use thiserror::Error;

/// Typed failures raised while turning raw input into a [`SalaryDataset`].
///
/// Call sites wrap these in `anyhow` with context about the source.
///
/// [`SalaryDataset`]: super::model::SalaryDataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: invalid value {value:?} for '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("server answered HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
