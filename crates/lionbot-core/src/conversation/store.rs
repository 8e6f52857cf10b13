//! Conversation store: the shared, bounded log of turns.
//!
//! One store is constructed at startup and shared by every request. There is
//! no per-client partitioning; all callers see the same history.
//!
//! Access goes through [`ConversationStore::lock`], which returns a guard
//! holding a single mutex for the whole snapshot -> remote call -> append ->
//! trim sequence, so concurrent chat rounds are serialized.

use std::collections::VecDeque;

use tokio::sync::{Mutex, MutexGuard};

use lionbot_types::chat::Turn;

/// Process-wide conversation history with FIFO eviction.
#[derive(Debug)]
pub struct ConversationStore {
    turns: Mutex<VecDeque<Turn>>,
    capacity: usize,
}

impl ConversationStore {
    /// Create an empty store that retains at most `capacity` turns.
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: Mutex::new(VecDeque::with_capacity(capacity + 2)),
            capacity,
        }
    }

    /// Maximum number of turns retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Acquire exclusive access to the history.
    pub async fn lock(&self) -> ConversationGuard<'_> {
        ConversationGuard {
            turns: self.turns.lock().await,
            capacity: self.capacity,
        }
    }
}

/// Exclusive handle on the history, released on drop.
pub struct ConversationGuard<'a> {
    turns: MutexGuard<'a, VecDeque<Turn>>,
    capacity: usize,
}

impl ConversationGuard<'_> {
    /// Append a turn at the end of the history.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push_back(turn);
    }

    /// Copy of the current history, oldest first.
    pub fn snapshot_for_request(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    /// Evict the oldest turns until at most `max_len` remain.
    pub fn trim(&mut self, max_len: usize) {
        while self.turns.len() > max_len {
            self.turns.pop_front();
        }
    }

    /// Evict down to the store's configured capacity.
    pub fn trim_to_capacity(&mut self) {
        let capacity = self.capacity;
        self.trim(capacity);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop every turn.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
