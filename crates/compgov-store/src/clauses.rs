//! Per-plan clause-extraction files (`plan*_clause_extract.json`).

use std::path::{Path, PathBuf};

use compgov_classify::ClauseRecord;
use tracing::{debug, warn};

use crate::StoreError;

pub const CLAUSE_FILE_PATTERN: &str = "plan*_clause_extract.json";

/// Clause files in `dir`, sorted by path.
pub fn find_clause_files(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::InputNotFound(dir.to_path_buf()));
    }
    let pattern = dir.join(CLAUSE_FILE_PATTERN);
    let pattern = pattern
        .to_str()
        .ok_or_else(|| StoreError::Other(format!("non-UTF-8 path: {}", dir.display())))?;

    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) => files.push(path),
            Err(e) => warn!(error = %e, "unreadable clause file entry"),
        }
    }
    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "found clause files");
    Ok(files)
}

/// Read one clause file.
///
/// Anything other than a JSON array of records (an object, `null`) reads as
/// no records.
pub fn read_clause_file(path: &Path) -> Result<Vec<ClauseRecord>, StoreError> {
    let value: serde_json::Value = crate::json::read_json(path)?;
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        _ => {
            warn!(path = %path.display(), "clause file is not a JSON array");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_matching_files_sorted() {
        let tmp = TempDir::new().unwrap();
        for name in [
            "plan10_clause_extract.json",
            "plan02_clause_extract.json",
            "notes.json",
            "plan03_summary.json",
        ] {
            fs::write(tmp.path().join(name), "[]").unwrap();
        }
        let files = find_clause_files(tmp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["plan02_clause_extract.json", "plan10_clause_extract.json"]);
    }

    #[test]
    fn missing_directory_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = find_clause_files(&tmp.path().join("medical")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn reads_records() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plan01_clause_extract.json");
        fs::write(
            &path,
            r#"[{"plan": "Medical AE", "policy": "Clawback", "details": "Gap noted."},
                {"plan": "Medical AE", "policy": "SPIF", "details": "SPIFs may be offered."}]"#,
        )
        .unwrap();
        let records = read_clause_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].policy, "SPIF");
    }

    #[test]
    fn non_array_reads_as_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plan01_clause_extract.json");
        fs::write(&path, r#"{"plan": "x"}"#).unwrap();
        assert!(read_clause_file(&path).unwrap().is_empty());
    }
}
