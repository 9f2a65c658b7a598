//! Notifications published after the change stack mutates
//!
//! Editor views subscribe to refresh after every apply, undo, redo or clear.
//! Built on tokio's broadcast channel; publishing never blocks and never fails.
//!
//! # Example
//!
//! ```rust
//! use draftkit_undo_redo::{BackendChange, ChangeEvents, ChangeRecord, ChangeStack, UndoRedoEvent};
//!
//! # tokio_test::block_on(async {
//! let mut stack = ChangeStack::with_events(ChangeEvents::new());
//! let mut rx = stack.subscribe().unwrap();
//! let mut title = String::new();
//!
//! let change = ChangeRecord::new(
//!     BackendChange::new("edit_title").with("new_value", "Ratios"),
//!     |_: &BackendChange, t: &mut String| {
//!         t.push_str("Ratios");
//!         Ok(())
//!     },
//!     |_: &BackendChange, t: &mut String| {
//!         t.clear();
//!         Ok(())
//!     },
//! );
//! stack.apply_change(change, &mut title).unwrap();
//!
//! assert_eq!(rx.recv().await.unwrap(), UndoRedoEvent::Applied { change_count: 1 });
//! # });
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default channel capacity
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Largest capacity accepted from configuration
pub const MAX_EVENT_CAPACITY: usize = 65_536;

/// A completed change stack transition.
///
/// `change_count` is the number of applied changes after the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UndoRedoEvent {
    /// A new change was applied
    Applied {
        /// Applied changes after the transition
        change_count: usize,
    },
    /// The most recent change was reversed
    Undone {
        /// Applied changes after the transition
        change_count: usize,
    },
    /// The most recently undone change was re-applied
    Redone {
        /// Applied changes after the transition
        change_count: usize,
    },
    /// History was discarded
    Cleared,
}

/// Broadcast channel for [`UndoRedoEvent`]s
///
/// Clones share the same channel.
#[derive(Clone, Debug)]
pub struct ChangeEvents {
    sender: broadcast::Sender<UndoRedoEvent>,
}

impl ChangeEvents {
    /// Create a channel with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a channel with a custom capacity
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or larger than `usize::MAX >> 1`, as
    /// [`broadcast::channel`] does. Configured capacities are bounded by
    /// [`MAX_EVENT_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    ///
    /// Slow subscribers lose the oldest events once the channel is full.
    pub fn publish(&self, event: UndoRedoEvent) {
        // no subscribers is fine
        let _ = self.sender.send(event);
    }

    /// Receive all events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<UndoRedoEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeEvents {
    fn default() -> Self {
        Self::new()
    }
}
