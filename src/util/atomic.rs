//! Crash-tolerant file replacement via staging copy + delete + rename.
//!
//! When the destination already exists the sequence is
//! `copy(source, dest~temp) -> sync -> remove(dest) -> rename(dest~temp, dest)`.
//! The new bytes are on storage before the old destination is removed, so a
//! crash at any step leaves either the untouched destination or the staged
//! copy next to it, never a truncated destination.
//!
//! A staging file left behind by a killed process carries no meaning and is
//! removed by the next replace of the same destination, whichever branch that
//! replace takes.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::{SnapError, SnapResult};

/// Suffix appended to the destination path to form the staging path.
pub const STAGING_SUFFIX: &str = "~temp";

/// Whether a missing source is an error or a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRequirement {
    /// Missing source fails with [`SnapError::MissingSource`].
    Required,
    /// Missing source succeeds without touching anything.
    Optional,
}

/// What a successful [`replace`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// Optional source was absent; nothing was touched.
    Skipped,
    /// Destination did not exist and was created by a single copy.
    Copied,
    /// Existing destination was swapped for a staged copy.
    Replaced,
}

/// Staging path for `destination`: the same path with [`STAGING_SUFFIX`]
/// appended to the file name.
pub fn staging_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

/// Copy `source` over `destination` without ever leaving `destination`
/// truncated.
///
/// # Errors
///
/// - [`SnapError::MissingSource`] if `source` is absent and `requirement` is
///   [`SourceRequirement::Required`]. Nothing is touched.
/// - [`SnapError::CopyFailed`] if the bytes could not be copied. An existing
///   destination is untouched.
/// - [`SnapError::DeleteFailed`] if the existing destination could not be
///   removed. It still holds its original content and no rename is attempted.
/// - [`SnapError::RenameFailed`] if the staged copy could not be moved into
///   place and the fallback copy also failed. The new content stays at the
///   staging path.
pub fn replace(
    source: &Path,
    destination: &Path,
    requirement: SourceRequirement,
) -> SnapResult<ReplaceOutcome> {
    if !source.exists() {
        return match requirement {
            SourceRequirement::Required => {
                error!(path = %source.display(), "required source not found");
                Err(SnapError::MissingSource {
                    path: source.to_path_buf(),
                })
            }
            SourceRequirement::Optional => {
                info!(path = %source.display(), "is clear, nothing to carry over");
                Ok(ReplaceOutcome::Skipped)
            }
        };
    }

    let staging = staging_path(destination);
    if staging.exists() {
        warn!(path = %staging.display(), "discarding leftover staging file");
        discard(&staging);
    }

    if destination.exists() {
        replace_existing_with(source, destination, |from: &Path, to: &Path| {
            fs::rename(from, to)
        })?;
        Ok(ReplaceOutcome::Replaced)
    } else {
        copy_fresh(source, destination)?;
        Ok(ReplaceOutcome::Copied)
    }
}

/// Nothing to protect: copy straight into place.
fn copy_fresh(source: &Path, destination: &Path) -> SnapResult<()> {
    if let Err(e) = copy_synced(source, destination) {
        // The destination did not exist before; do not leave a partial one.
        discard(destination);
        return Err(SnapError::CopyFailed {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: e,
        });
    }
    debug!(from = %source.display(), to = %destination.display(), "copied");
    Ok(())
}

/// Protected case: stage, delete, then move the staged copy into place with
/// `rename`.
fn replace_existing_with(
    source: &Path,
    destination: &Path,
    rename: impl Fn(&Path, &Path) -> io::Result<()>,
) -> SnapResult<()> {
    let staging = staging_path(destination);

    if let Err(e) = copy_synced(source, &staging) {
        discard(&staging);
        return Err(SnapError::CopyFailed {
            from: source.to_path_buf(),
            to: staging,
            source: e,
        });
    }

    if let Err(e) = fs::remove_file(destination) {
        discard(&staging);
        return Err(SnapError::DeleteFailed {
            path: destination.to_path_buf(),
            source: e,
        });
    }

    if let Err(e) = rename(&staging, destination) {
        return recover_from_staging(&staging, destination, e);
    }

    sync_parent_dir(destination);
    debug!(from = %source.display(), to = %destination.display(), "replaced");
    Ok(())
}

/// The destination is gone and the rename failed: try to copy the staged
/// bytes into place instead.
fn recover_from_staging(
    staging: &Path,
    destination: &Path,
    rename_err: io::Error,
) -> SnapResult<()> {
    warn!(
        staging = %staging.display(),
        destination = %destination.display(),
        error = %rename_err,
        "rename failed, copying staged content into place"
    );

    match copy_synced(staging, destination) {
        Ok(()) => {
            discard(staging);
            Ok(())
        }
        Err(e) => {
            discard(destination);
            error!(
                staging = %staging.display(),
                destination = %destination.display(),
                error = %e,
                "could not move staged content into place; it is kept at the staging path"
            );
            Err(SnapError::RenameFailed {
                staging: staging.to_path_buf(),
                destination: destination.to_path_buf(),
                source: rename_err,
            })
        }
    }
}

/// Copy `from` to `to` (overwriting) and flush the new file to storage.
///
/// The copy is written through a handle we own, so a read-only source does
/// not make the copy read-only or unsyncable.
fn copy_synced(from: &Path, to: &Path) -> io::Result<()> {
    let mut reader = fs::File::open(from)?;
    if !reader.metadata()?.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source is not a regular file",
        ));
    }
    let mut writer = fs::File::create(to)?;
    io::copy(&mut reader, &mut writer)?;
    writer.sync_all()
}

/// Best-effort removal of a file we own; absence is not an error.
fn discard(path: &Path) {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            warn!(path = %path.display(), error = %e, "failed to remove file");
        }
        _ => {}
    }
}

/// Best-effort fsync of the directory entry created by the rename.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    let Some(parent) = path.parent() else {
        return;
    };
    if let Err(e) = fs::File::open(parent).and_then(|dir| dir.sync_all()) {
        debug!(path = %parent.display(), error = %e, "parent directory fsync failed");
    }
}

#[cfg(not(unix))]
const fn sync_parent_dir(_path: &Path) {}
