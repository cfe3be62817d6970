use std::collections::VecDeque;

use crate::engine::actions::PlayerActionKind;
use crate::players::{ActionSource, TableView};

/// Заранее заданная очередь действий (тесты, реплей).
///
/// Когда очередь кончилась – check или fold.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    queue: VecDeque<PlayerActionKind>,
}

impl ScriptedSource {
    pub fn new<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = PlayerActionKind>,
    {
        Self {
            queue: actions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, action: PlayerActionKind) {
        self.queue.push_back(action);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ActionSource for ScriptedSource {
    fn decide_action(&mut self, view: &TableView) -> PlayerActionKind {
        self.queue
            .pop_front()
            .unwrap_or_else(|| view.passive_fallback())
    }
}
