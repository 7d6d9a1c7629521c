// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded undo/redo snapshots of the line vector.

use std::collections::VecDeque;

/// Maximum retained undo snapshots. When full, the oldest is dropped.
pub const HISTORY_CAP: usize = 256;

/// Whole-buffer snapshots for undo and redo.
///
/// Each mutation records the pre-edit line vector. Undo and redo swap
/// snapshots between two stacks; recording a fresh edit clears the redo
/// side, so redo never resurrects an overwritten branch.
#[derive(Debug, Default)]
pub struct History {
    undo: VecDeque<Vec<String>>,
    redo: VecDeque<Vec<String>>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pre-edit snapshot and clears the redo stack.
    pub fn record(&mut self, snapshot: Vec<String>) {
        if self.undo.len() == HISTORY_CAP {
            self.undo.pop_front();
        }
        self.undo.push_back(snapshot);
        self.redo.clear();
    }

    /// Pops the most recent snapshot, stashing `current` for redo.
    ///
    /// Returns `None` (and leaves `current` unused) when there is nothing
    /// to undo.
    pub fn undo(&mut self, current: Vec<String>) -> Option<Vec<String>> {
        let previous = self.undo.pop_back()?;
        self.redo.push_back(current);
        Some(previous)
    }

    /// Re-applies the most recently undone snapshot, stashing `current`
    /// back on the undo stack.
    pub fn redo(&mut self, current: Vec<String>) -> Option<Vec<String>> {
        let next = self.redo.pop_back()?;
        self.undo.push_back(current);
        Some(next)
    }

    /// Number of undo steps currently available.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo steps currently available.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn undo_restores_recorded_snapshots_in_reverse() {
        let mut history = History::new();
        history.record(snapshot("v1"));
        history.record(snapshot("v2"));

        assert_eq!(history.undo(snapshot("v3")), Some(snapshot("v2")));
        assert_eq!(history.undo(snapshot("v2")), Some(snapshot("v1")));
        assert_eq!(history.undo(snapshot("v1")), None);
    }

    #[test]
    fn redo_walks_back_up_the_undo_chain() {
        let mut history = History::new();
        history.record(snapshot("v1"));

        assert_eq!(history.undo(snapshot("v2")), Some(snapshot("v1")));
        assert_eq!(history.redo(snapshot("v1")), Some(snapshot("v2")));
        // And the redone state can be undone again.
        assert_eq!(history.undo(snapshot("v2")), Some(snapshot("v1")));
    }

    #[test]
    fn recording_clears_redo() {
        let mut history = History::new();
        history.record(snapshot("v1"));
        history.undo(snapshot("v2"));
        assert_eq!(history.redo_depth(), 1);

        history.record(snapshot("v1"));
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.redo(snapshot("anything")), None);
    }

    #[test]
    fn history_is_capped_dropping_oldest() {
        let mut history = History::new();
        for i in 0..HISTORY_CAP + 10 {
            history.record(snapshot(&format!("v{i}")));
        }
        assert_eq!(history.undo_depth(), HISTORY_CAP);

        // Unwind everything: the newest snapshot comes first, and the very
        // oldest surviving one is v10 (v0..v9 were dropped).
        let mut last = None;
        while let Some(s) = history.undo(snapshot("current")) {
            last = Some(s);
        }
        assert_eq!(last, Some(snapshot("v10")));
    }

    #[test]
    fn empty_history_refuses_both_directions() {
        let mut history = History::new();
        assert_eq!(history.undo(snapshot("x")), None);
        assert_eq!(history.redo(snapshot("x")), None);
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
    }
}
