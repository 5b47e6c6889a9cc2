//! In-process action sources: a fixed script and a channel.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};

use super::{Action, ActionSource};
use crate::error::SnapResult;

/// Yields a fixed sequence of actions, then ends.
#[derive(Debug, Clone, Default)]
pub struct ScriptedActionSource {
    actions: VecDeque<Action>,
}

impl ScriptedActionSource {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    /// Actions not yet pulled.
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl ActionSource for ScriptedActionSource {
    fn next_action(&mut self) -> SnapResult<Option<Action>> {
        Ok(self.actions.pop_front())
    }
}

/// Receives actions pushed from another thread (e.g. a global hotkey
/// listener). The stream ends once every sender is dropped.
#[derive(Debug)]
pub struct ChannelActionSource {
    rx: Receiver<Action>,
}

impl ChannelActionSource {
    pub const fn new(rx: Receiver<Action>) -> Self {
        Self { rx }
    }

    /// Create a connected sender and source.
    pub fn channel() -> (Sender<Action>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }
}

impl ActionSource for ChannelActionSource {
    fn next_action(&mut self) -> SnapResult<Option<Action>> {
        // RecvError only means all senders are gone.
        Ok(self.rx.recv().ok())
    }
}
