//! Shared scratch layout for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use savesnap::paths::{SAVE_ROOT, SaveLayout};
use savesnap::util::staging_path;
use tempfile::TempDir;

pub const ACCOUNT: &str = "76561198012345678";

/// A user data root and a working directory, both temporary.
pub struct Fixture {
    pub data: TempDir,
    pub work: TempDir,
    pub layout: SaveLayout,
}

impl Fixture {
    /// Layout with an account directory, so the save path is writable.
    pub fn with_account() -> Self {
        let data = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(data.path().join(SAVE_ROOT).join(ACCOUNT)).expect("mkdir");
        Self::build(data)
    }

    /// Layout with no save root at all.
    pub fn without_account() -> Self {
        Self::build(tempfile::tempdir().expect("tempdir"))
    }

    fn build(data: TempDir) -> Self {
        let work = tempfile::tempdir().expect("tempdir");
        let layout = SaveLayout::resolve(data.path(), work.path());
        layout.ensure_slot_dirs().expect("slot dirs");
        Self { data, work, layout }
    }

    pub fn write_save(&self, content: &str) {
        fs::write(&self.layout.save, content).expect("write save");
    }

    pub fn write_backup(&self, content: &str) {
        fs::write(&self.layout.backup, content).expect("write backup");
    }

    pub fn save(&self) -> Option<String> {
        read_opt(&self.layout.save)
    }

    pub fn backup(&self) -> Option<String> {
        read_opt(&self.layout.backup)
    }

    pub fn previous_backup(&self) -> Option<String> {
        read_opt(&self.layout.previous_backup)
    }

    /// No staging file is left next to any of the three paths.
    pub fn assert_no_staging(&self) {
        for path in [&self.layout.save, &self.layout.backup, &self.layout.previous_backup] {
            let staged = staging_path(path);
            assert!(!staged.exists(), "staging file left at {}", staged.display());
        }
    }
}

fn read_opt(path: &Path) -> Option<String> {
    path.exists()
        .then(|| fs::read_to_string(path).expect("read"))
}
