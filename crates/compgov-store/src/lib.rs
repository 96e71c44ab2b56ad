//! Input readers and JSON persistence: master workbook (calamine), Word
//! documents (docx-rs), clause-extraction JSON, and the deliverables CSV.

mod error;
pub use error::StoreError;

pub mod checklist;
pub mod clauses;
pub mod docx;
pub mod json;
pub mod probe;
pub mod workbook;

pub use checklist::read_checklist;
pub use clauses::{find_clause_files, read_clause_file};
pub use json::{read_json, write_json};
pub use probe::probe_file;
pub use workbook::MasterWorkbook;
