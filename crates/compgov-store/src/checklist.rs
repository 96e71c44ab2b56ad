//! Deliverables checklist CSV.

use std::path::Path;

use compgov_core::deliverable::ChecklistRow;
use tracing::debug;

use crate::StoreError;

/// Header names and rows of the checklist, in file order.
///
/// Short rows are padded with empty values; extra trailing fields are dropped.
pub fn read_checklist(path: &Path) -> Result<(Vec<String>, Vec<ChecklistRow>), StoreError> {
    if !path.exists() {
        return Err(StoreError::InputNotFound(path.to_path_buf()));
    }
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), record.get(i).unwrap_or_default().to_string()))
            .collect();
        rows.push(ChecklistRow { columns });
    }
    debug!(path = %path.display(), rows = rows.len(), "read checklist");
    Ok((headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn preserves_header_order_and_pads_short_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mapping.csv");
        fs::write(
            &path,
            "Category,Readout Item,Priority,Deliverable Type,Deliverable File Path\n\
             Policy,\"Clawback, recovery\",CRITICAL,Policy,02_POLICIES/CLAWBACK_AND_RECOVERY_POLICY_DRAFT.docx\n\
             Training,Kickoff deck,HIGH\n",
        )
        .unwrap();

        let (headers, rows) = read_checklist(&path).unwrap();
        assert_eq!(headers[1], "Readout Item");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Readout Item"), Some("Clawback, recovery"));
        assert_eq!(rows[0].priority(), "CRITICAL");
        assert_eq!(rows[1].file_path(), "");
        assert_eq!(rows[1].columns.len(), 5);
    }

    #[test]
    fn missing_checklist_is_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(read_checklist(&tmp.path().join("absent.csv")).unwrap_err().is_not_found());
    }
}
