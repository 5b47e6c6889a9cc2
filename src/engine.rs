//! Backup and restore operations over the resolved save layout.
//!
//! Backup rotates the current backup into the previous-backup slot, then
//! captures the live save into the backup slot. Restore copies the backup
//! slot over the live save. Every move goes through
//! [`replace`](crate::util::atomic::replace).

use tracing::{error, info};

use crate::dispatch::Action;
use crate::error::SnapResult;
use crate::paths::SaveLayout;
use crate::util::atomic::{replace, SourceRequirement};

/// Stateless executor of backup and restore against one [`SaveLayout`].
#[derive(Debug, Clone)]
pub struct Engine {
    layout: SaveLayout,
}

impl Engine {
    pub const fn new(layout: SaveLayout) -> Self {
        Self { layout }
    }

    pub const fn layout(&self) -> &SaveLayout {
        &self.layout
    }

    /// Snapshot the live save into the backup slot.
    ///
    /// Rotation runs first and capture always runs after it, even when the
    /// rotation failed. The call succeeds only if both steps succeed.
    ///
    /// # Errors
    ///
    /// Returns the rotation error if rotation failed, otherwise the capture
    /// error. A missing live save is [`SnapError::MissingSource`].
    ///
    /// [`SnapError::MissingSource`]: crate::error::SnapError::MissingSource
    pub fn backup(&self) -> SnapResult<()> {
        let rotation = replace(
            &self.layout.backup,
            &self.layout.previous_backup,
            SourceRequirement::Optional,
        );
        if let Err(e) = &rotation {
            error!(error = %e, "failed to rotate backup into previous-backup slot");
        }

        let capture = replace(
            &self.layout.save,
            &self.layout.backup,
            SourceRequirement::Required,
        );
        if let Err(e) = &capture {
            error!(error = %e, "failed to capture save into backup slot");
        }

        rotation.and(capture)?;
        info!(path = %self.layout.backup.display(), "backed up");
        Ok(())
    }

    /// Copy the backup slot over the live save.
    ///
    /// # Errors
    ///
    /// Fails with [`SnapError::MissingSource`] when no backup exists, or with
    /// the copy/delete/rename error from the replace.
    ///
    /// [`SnapError::MissingSource`]: crate::error::SnapError::MissingSource
    pub fn restore(&self) -> SnapResult<()> {
        replace(
            &self.layout.backup,
            &self.layout.save,
            SourceRequirement::Required,
        )?;
        info!(path = %self.layout.save.display(), "restored");
        Ok(())
    }

    /// Run the operation bound to `action`. `None` for [`Action::Quit`].
    pub fn run(&self, action: Action) -> Option<SnapResult<()>> {
        match action {
            Action::Backup => Some(self.backup()),
            Action::Restore => Some(self.restore()),
            Action::Quit => None,
        }
    }
}
