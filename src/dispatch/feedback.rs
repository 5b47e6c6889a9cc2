//! Confirmation cue fired after a successful backup or restore.

use std::io::Write;

use tracing::debug;

use super::Action;

/// Hook invoked after an action completed successfully.
pub trait Feedback {
    fn confirm(&mut self, action: Action);
}

/// Does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn confirm(&mut self, _action: Action) {}
}

impl<F: FnMut(Action)> Feedback for F {
    fn confirm(&mut self, action: Action) {
        self(action);
    }
}

/// Writes a terminal bell (`BEL`, 0x07) to the wrapped writer.
#[derive(Debug)]
pub struct BellFeedback<W> {
    out: W,
}

impl<W: Write> BellFeedback<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Feedback for BellFeedback<W> {
    fn confirm(&mut self, action: Action) {
        if let Err(e) = self.out.write_all(b"\x07").and_then(|()| self.out.flush()) {
            debug!(%action, error = %e, "failed to ring bell");
        }
    }
}
