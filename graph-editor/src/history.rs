// Undo/redo over serialized snapshots of the whole graph

use std::collections::VecDeque;

/// Undo steps kept before the oldest snapshot is dropped.
pub const MAX_UNDO_REDO: usize = 100;

/// Snapshot stack with a cursor. `entries[pointer]` is the current state;
/// pushing discards everything after the cursor.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<String>,
    pointer: usize,
    max_steps: usize,
}

impl History {
    pub fn new(initial: String) -> Self { History::with_capacity(initial, MAX_UNDO_REDO) }

    pub fn with_capacity(initial: String, max_steps: usize) -> Self {
        let mut entries = VecDeque::with_capacity(max_steps.min(MAX_UNDO_REDO) + 1);
        entries.push_back(initial);
        History { entries, pointer: 0, max_steps: max_steps.max(1) }
    }

    pub fn push(&mut self, snapshot: String) {
        self.entries.truncate(self.pointer + 1);
        self.entries.push_back(snapshot);
        if self.entries.len() > self.max_steps + 1 {
            self.entries.pop_front();
        } else {
            self.pointer += 1;
        }
    }

    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() { return None; }
        self.pointer -= 1;
        self.current()
    }

    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() { return None; }
        self.pointer += 1;
        self.current()
    }

    pub fn current(&self) -> Option<&str> { self.entries.get(self.pointer).map(String::as_str) }
    pub fn can_undo(&self) -> bool { self.pointer > 0 }
    pub fn can_redo(&self) -> bool { self.pointer + 1 < self.entries.len() }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn pointer(&self) -> usize { self.pointer }
}
