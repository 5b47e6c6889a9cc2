//! Live save and backup slot path resolution.
//!
//! The live save sits at `<user data>/EldenRing/<account id>/ER0000.sl2`,
//! where the account id is a 17-digit numeric directory. The two backup
//! slots live under the working directory:
//!
//! ```text
//! <workdir>/backup/ER0000.sl2            most recent backup
//! <workdir>/~temp_backup.old/ER0000.sl2  backup before that
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{SnapError, SnapResult};

/// Save root folder under the user data directory.
pub const SAVE_ROOT: &str = "EldenRing";
/// Save file name, shared by the live save and both slots.
pub const SAVE_FILE: &str = "ER0000.sl2";
/// Directory holding the most recent backup.
pub const BACKUP_DIR: &str = "backup";
/// Directory holding the previous backup.
pub const PREVIOUS_BACKUP_DIR: &str = "~temp_backup.old";

/// Length of a numeric account id directory name.
pub const ACCOUNT_ID_LEN: usize = 17;
/// Account id used when no account directory is found.
pub const FALLBACK_ACCOUNT_ID: &str = "0";

/// Platform user data root (`%APPDATA%` on Windows).
pub fn user_data_root() -> SnapResult<PathBuf> {
    dirs::data_dir().ok_or(SnapError::DataRootUnavailable)
}

/// `<data_root>/EldenRing`.
pub fn save_root(data_root: &Path) -> PathBuf {
    data_root.join(SAVE_ROOT)
}

/// Whether `name` looks like a numeric account id.
pub fn is_account_id(name: &str) -> bool {
    name.len() == ACCOUNT_ID_LEN && name.bytes().all(|b| b.is_ascii_digit())
}

/// Find the account directory directly below `save_root`.
///
/// Candidates are visited in name order so the choice is stable when more
/// than one account has played on this machine.
pub fn find_account_dir(save_root: &Path) -> Option<PathBuf> {
    let entries = match fs::read_dir(save_root) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(path = %save_root.display(), error = %e, "cannot list save root");
            return None;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_str().is_some_and(is_account_id))
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Resolve the live save file path.
///
/// Falls back to the `0` account id when no account directory exists; the
/// returned path then does not exist and a later backup reports it missing.
pub fn resolve_save_path(save_root: &Path) -> PathBuf {
    let account_dir = find_account_dir(save_root).unwrap_or_else(|| {
        warn!(path = %save_root.display(), "no account directory found");
        save_root.join(FALLBACK_ACCOUNT_ID)
    });
    account_dir.join(SAVE_FILE)
}

/// `<workdir>/backup/ER0000.sl2`.
pub fn resolve_backup_path(workdir: &Path) -> PathBuf {
    workdir.join(BACKUP_DIR).join(SAVE_FILE)
}

/// `<workdir>/~temp_backup.old/ER0000.sl2`.
pub fn resolve_previous_backup_path(workdir: &Path) -> PathBuf {
    workdir.join(PREVIOUS_BACKUP_DIR).join(SAVE_FILE)
}

/// The three files the engine moves bytes between, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveLayout {
    /// Live save file.
    pub save: PathBuf,
    /// Most recent backup.
    pub backup: PathBuf,
    /// Backup that was current before the most recent one.
    pub previous_backup: PathBuf,
}

impl SaveLayout {
    /// Resolve all three paths from the user data root and working directory.
    pub fn resolve(data_root: &Path, workdir: &Path) -> Self {
        Self {
            save: resolve_save_path(&save_root(data_root)),
            backup: resolve_backup_path(workdir),
            previous_backup: resolve_previous_backup_path(workdir),
        }
    }

    /// Create both slot directories if missing.
    ///
    /// # Errors
    ///
    /// Returns [`SnapError::DirectoryCreateFailed`] for the first directory
    /// that cannot be created.
    pub fn ensure_slot_dirs(&self) -> SnapResult<()> {
        for slot in [&self.backup, &self.previous_backup] {
            if let Some(dir) = slot.parent() {
                ensure_dir(dir)?;
            }
        }
        Ok(())
    }
}

/// Create `dir` (and parents) if it does not exist. Returns whether it was
/// created.
pub fn ensure_dir(dir: &Path) -> SnapResult<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|source| SnapError::DirectoryCreateFailed {
        path: dir.to_path_buf(),
        source,
    })?;
    info!(path = %dir.display(), "created directory");
    Ok(true)
}
