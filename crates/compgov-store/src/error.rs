use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("xlsx error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("docx parse error in {path}: {message}")]
    Docx { path: PathBuf, message: String },

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Whether the error is a required input that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InputNotFound(_))
    }
}
