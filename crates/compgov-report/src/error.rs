use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
