//! Location of the notes export.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notes_model::DEFAULT_NOTES_FILE;

use crate::error::{IngestError, Result};

/// Environment variable naming the directory that holds the notes export.
pub const NOTES_DIR_ENV_VAR: &str = "MIMIC_4_DIR";

/// Resolve the notes directory.
///
/// An explicit directory wins; otherwise `MIMIC_4_DIR` is consulted.
pub fn resolve_notes_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_notes_dir_from(explicit, std::env::var_os(NOTES_DIR_ENV_VAR))
}

fn resolve_notes_dir_from(explicit: Option<&Path>, env_value: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    match env_value {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Err(IngestError::NotesDirNotConfigured {
            env_var: NOTES_DIR_ENV_VAR,
        }),
    }
}

/// Path of the notes export inside `notes_dir`.
pub fn notes_file_path(notes_dir: &Path) -> PathBuf {
    notes_dir.join(DEFAULT_NOTES_FILE)
}
