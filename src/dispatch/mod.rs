//! Action dispatch — pulls user actions one at a time and runs them.
//!
//! An [`ActionSource`] yields [`Action`]s (from stdin, a channel fed by a
//! hotkey thread, or a scripted queue). [`run_dispatch`] hands each one to
//! the [`Engine`], logs failures, and fires the [`Feedback`] hook after each
//! successful backup or restore. `Quit` or end-of-stream stops the loop.
//!
//! ```text
//! ActionSource → run_dispatch → Engine → util::atomic::replace
//!                     ↓ (on success)
//!                  Feedback
//! ```

pub mod feedback;
pub mod line;
pub mod queue;

use std::fmt;
use std::str::FromStr;

use tracing::{debug, error, info};

use crate::engine::Engine;
use crate::error::SnapResult;

pub use feedback::{BellFeedback, Feedback, NoFeedback};
pub use line::LineActionSource;
pub use queue::{ChannelActionSource, ScriptedActionSource};

/// A user-triggered intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Backup,
    Restore,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Backup => "backup",
            Self::Restore => "restore",
            Self::Quit => "quit",
        };
        f.write_str(name)
    }
}

/// Input token that names no action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    /// Accepts the action name, its first letter, or the key it is bound to
    /// (F1 backup, F5 restore, Ctrl+Q quit). Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backup" | "b" | "f1" => Ok(Self::Backup),
            "restore" | "r" | "f5" => Ok(Self::Restore),
            "quit" | "q" | "ctrl+q" => Ok(Self::Quit),
            _ => Err(UnknownAction(s.to_owned())),
        }
    }
}

/// Blocking producer of actions.
pub trait ActionSource {
    /// Wait for the next action. `Ok(None)` means the stream has ended.
    ///
    /// # Errors
    ///
    /// Returns [`SnapError::EventSource`](crate::error::SnapError::EventSource)
    /// when the underlying input fails; the dispatch loop stops on it.
    fn next_action(&mut self) -> SnapResult<Option<Action>>;
}

/// Why the dispatch loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// A `Quit` action was received.
    #[default]
    Quit,
    /// The action source ran dry.
    SourceClosed,
}

/// Counters reported when the dispatch loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub stopped_by: StopReason,
}

/// Run actions from `source` against `engine` until `Quit` or end-of-stream.
///
/// Operation failures are logged and the loop keeps waiting; nothing is
/// retried. Actions after `Quit` are never pulled from the source.
///
/// # Errors
///
/// Returns the source's error if reading the next action fails.
pub fn run_dispatch(
    engine: &Engine,
    source: &mut impl ActionSource,
    feedback: &mut impl Feedback,
) -> SnapResult<DispatchSummary> {
    let mut summary = DispatchSummary::default();

    loop {
        let Some(action) = source.next_action()? else {
            info!("action source closed");
            summary.stopped_by = StopReason::SourceClosed;
            break;
        };

        debug!(%action, "dispatching action");

        let Some(result) = engine.run(action) else {
            summary.stopped_by = StopReason::Quit;
            break;
        };

        match result {
            Ok(()) => {
                summary.succeeded += 1;
                feedback.confirm(action);
            }
            Err(e) => {
                summary.failed += 1;
                match action {
                    Action::Restore => error!(error = %e, "failed to restore game save"),
                    _ => error!(error = %e, "failed to back up game save"),
                }
            }
        }
    }

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        stopped_by = ?summary.stopped_by,
        "dispatch loop stopped"
    );
    Ok(summary)
}
