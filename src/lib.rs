//! `savesnap` — on-demand snapshot and restore of a single game save file.
//!
//! The user triggers three actions: back up the live save, restore it from
//! the backup, or quit. Backups rotate through two slots (current and
//! previous), and every file move goes through a staging copy so that an
//! interrupted operation never leaves a slot truncated or empty.
//!
//! # Modules
//!
//! - `paths` — locate the live save and the two backup slots
//! - `util::atomic` — crash-tolerant copy-over-destination primitive
//! - `engine` — backup (rotate + capture) and restore
//! - `dispatch` — action sources, feedback hook, and the dispatch loop
//!
//! # Architecture
//!
//! ```text
//! ActionSource (stdin / channel / script) → run_dispatch → Engine
//!                                                            ↓
//!                                     util::atomic::replace(save, slots)
//! ```

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod paths;
pub mod util;

pub use dispatch::{run_dispatch, Action, ActionSource, DispatchSummary, Feedback, NoFeedback};
pub use engine::Engine;
pub use error::{SnapError, SnapResult};
pub use paths::SaveLayout;
