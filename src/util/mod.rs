//! Filesystem helpers shared by the engine.

pub mod atomic;

pub use atomic::{replace, staging_path, ReplaceOutcome, SourceRequirement};
