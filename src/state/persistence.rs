//! Pet snapshot persistence
//!
//! A save file is a flat, pretty-printed JSON record of a [`PetSnapshot`]
//! plus a `format_version`. Writes go through a temp file in the target
//! directory and a rename, so an interrupted save never leaves half a pet
//! on disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::{Result, TomodachiError};
use crate::pet::PetSnapshot;

/// Current save layout
pub const FORMAT_VERSION: u32 = 1;

/// Save file used when no path is configured or given
pub const DEFAULT_SAVE_FILE: &str = "pet.json";

/// On-disk record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveFile {
    format_version: u32,
    #[serde(flatten)]
    pet: PetSnapshot,
}

/// Save a snapshot to `path`
///
/// # Returns
/// * `Ok(())` once the file is fully written and renamed into place
/// * `Err(FileWrite)` if the directory is missing or not writable
pub fn save_snapshot(path: &Path, snapshot: &PetSnapshot) -> Result<()> {
    let record = SaveFile {
        format_version: FORMAT_VERSION,
        pet: snapshot.clone(),
    };

    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| TomodachiError::Serialization(Arc::new(e.to_string())))?;

    let dir = parent_dir(path);
    let mut tmp =
        NamedTempFile::new_in(&dir).map_err(|e| TomodachiError::file_write(path, e.to_string()))?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| TomodachiError::file_write(path, e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| TomodachiError::file_write(path, e.error.to_string()))?;

    info!("Saved {} to {:?}", snapshot.name, path);
    Ok(())
}

/// Load a snapshot from `path`
///
/// Every field is required. A missing, mistyped or out-of-range field is an
/// error; nothing is defaulted.
pub fn load_snapshot(path: &Path) -> Result<PetSnapshot> {
    let json = fs::read_to_string(path).map_err(|e| TomodachiError::file_access(path, &e))?;

    let record: SaveFile =
        serde_json::from_str(&json).map_err(|e| TomodachiError::SnapshotParse {
            path: path.to_path_buf(),
            message: Arc::new(e.to_string()),
        })?;

    if record.format_version != FORMAT_VERSION {
        return Err(TomodachiError::invalid_snapshot(
            "format_version",
            format!(
                "unsupported version {} (expected {FORMAT_VERSION})",
                record.format_version
            ),
        ));
    }

    debug!("Parsed save file {:?} for {}", path, record.pet.name);
    Ok(record.pet)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
