//! JSON intermediates: read with a not-found check, write pretty-printed.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::StoreError;

/// Deserialize `path`. A missing file is [`StoreError::InputNotFound`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    if !path.exists() {
        return Err(StoreError::InputNotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Serialize `value` with two-space indentation and write it to `path`,
/// creating parent directories.
///
/// The document is fully rendered before the file is touched.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let body = serde_json::to_vec_pretty(value)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &body)?;
    info!(path = %path.display(), bytes = body.len(), "wrote json");
    Ok(())
}
