//! Existence checks for declared deliverable files.

use std::fs;
use std::path::Path;

use compgov_core::deliverable::FileProbe;

/// Look for `declared` under `root`. An empty declaration probes nothing.
pub fn probe_file(root: &Path, declared: &str) -> FileProbe {
    if declared.is_empty() {
        return FileProbe::default();
    }
    let resolved = root.join(declared);
    match fs::metadata(&resolved) {
        Ok(meta) => FileProbe {
            exists: true,
            size: meta.len(),
            resolved,
        },
        Err(_) => FileProbe {
            exists: false,
            size: 0,
            resolved,
        },
    }
}
