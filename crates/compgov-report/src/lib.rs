//! Output renderers: the coverage matrix and deliverables workbooks
//! (rust_xlsxwriter) and policy library Markdown.

mod error;
pub use error::ReportError;

pub mod deliverables;
pub mod library;
pub mod matrix;
pub mod style;

pub use deliverables::build_deliverables_workbook;
pub use library::{render_policy_markdown, word_count};
pub use matrix::{MatrixSummary, build_matrix_workbook};
