//! Undo/redo history over caller-owned targets
//!
//! [`ChangeStack`] keeps two stacks: applied changes in application order and
//! undone changes with the most recently undone last. A change is only ever
//! in one of them. Applying a new change discards the undone stack.
//!
//! The edited target is never stored; it is passed to every call that runs a
//! callback.
//!
//! # Callback failures
//!
//! When an apply or reverse callback returns `Err`, the stack's bookkeeping is
//! left exactly as it was before the call and the error is returned wrapped in
//! [`UndoRedoError::ApplyFailed`] or [`UndoRedoError::ReverseFailed`]:
//!
//! - a change whose apply fails in [`ChangeStack::apply_change`] is dropped and
//!   the undone stack is kept
//! - a change whose reverse fails in [`ChangeStack::undo_change`] stays applied
//! - a change whose apply fails in [`ChangeStack::redo_change`] stays undone
//!
//! Any partial mutation of the target is the callback's responsibility.

use serde::Serialize;
use tracing::{debug, trace};

use crate::change::ChangeRecord;
use crate::config::ChangeStackConfig;
use crate::error::UndoRedoError;
use crate::events::{ChangeEvents, UndoRedoEvent};

/// Manages undo/redo stacks for one editing session
pub struct ChangeStack<P, T> {
    applied_changes: Vec<ChangeRecord<P, T>>,
    undone_changes: Vec<ChangeRecord<P, T>>,
    events: Option<ChangeEvents>,
}

impl<P, T> ChangeStack<P, T> {
    /// Create an empty stack without notifications
    pub fn new() -> Self {
        ChangeStack {
            applied_changes: Vec::new(),
            undone_changes: Vec::new(),
            events: None,
        }
    }

    /// Create an empty stack publishing to `events`
    pub fn with_events(events: ChangeEvents) -> Self {
        ChangeStack {
            events: Some(events),
            ..Self::new()
        }
    }

    /// Create an empty stack as described by `config`
    pub fn from_config(config: &ChangeStackConfig) -> Result<Self, UndoRedoError> {
        config.validate()?;
        if config.emit_events {
            Ok(Self::with_events(ChangeEvents::with_capacity(config.event_capacity)))
        } else {
            Ok(Self::new())
        }
    }

    /// Subscribe to transitions, if this stack publishes them
    pub fn subscribe(&self) -> Option<tokio::sync::broadcast::Receiver<UndoRedoEvent>> {
        self.events.as_ref().map(ChangeEvents::subscribe)
    }

    /// Apply `change` to `target` and record it.
    ///
    /// On success the undone stack is cleared, even when the new change is
    /// unrelated to what was undone.
    pub fn apply_change(
        &mut self,
        change: ChangeRecord<P, T>,
        target: &mut T,
    ) -> Result<(), UndoRedoError> {
        change.apply_to(target).map_err(UndoRedoError::ApplyFailed)?;

        self.applied_changes.push(change);

        let discarded = self.undone_changes.len();
        self.undone_changes.clear();

        debug!(
            change_count = self.applied_changes.len(),
            discarded_redos = discarded,
            "Applied change"
        );
        self.publish(UndoRedoEvent::Applied {
            change_count: self.applied_changes.len(),
        });
        Ok(())
    }

    /// Reverse the most recent change.
    ///
    /// Returns `Ok(false)` without side effects when nothing is applied.
    pub fn undo_change(&mut self, target: &mut T) -> Result<bool, UndoRedoError> {
        let Some(change) = self.applied_changes.pop() else {
            trace!("Nothing to undo");
            return Ok(false);
        };

        if let Err(e) = change.reverse_on(target) {
            self.applied_changes.push(change);
            return Err(UndoRedoError::ReverseFailed(e));
        }

        self.undone_changes.push(change);

        debug!(
            change_count = self.applied_changes.len(),
            redo_count = self.undone_changes.len(),
            "Undid change"
        );
        self.publish(UndoRedoEvent::Undone {
            change_count: self.applied_changes.len(),
        });
        Ok(true)
    }

    /// Re-apply the most recently undone change with its original apply
    /// callback.
    ///
    /// Returns `Ok(false)` without side effects when nothing is undone.
    pub fn redo_change(&mut self, target: &mut T) -> Result<bool, UndoRedoError> {
        let Some(change) = self.undone_changes.pop() else {
            trace!("Nothing to redo");
            return Ok(false);
        };

        if let Err(e) = change.apply_to(target) {
            self.undone_changes.push(change);
            return Err(UndoRedoError::ApplyFailed(e));
        }

        self.applied_changes.push(change);

        debug!(
            change_count = self.applied_changes.len(),
            redo_count = self.undone_changes.len(),
            "Redid change"
        );
        self.publish(UndoRedoEvent::Redone {
            change_count: self.applied_changes.len(),
        });
        Ok(true)
    }

    /// Whether any change is currently applied
    pub fn has_changes(&self) -> bool {
        !self.applied_changes.is_empty()
    }

    /// Number of applied changes; undone changes are not counted
    pub fn get_change_count(&self) -> usize {
        self.applied_changes.len()
    }

    /// Drop all history without running any callback.
    ///
    /// The target is not rolled back; call this after saving or discarding it.
    pub fn clear_changes(&mut self) {
        self.applied_changes.clear();
        self.undone_changes.clear();

        debug!("Cleared change history");
        self.publish(UndoRedoEvent::Cleared);
    }

    /// Applied changes in application order
    pub fn get_changes(&self) -> &[ChangeRecord<P, T>] {
        &self.applied_changes
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.applied_changes.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.undone_changes.is_empty()
    }

    /// Number of changes available to redo
    pub fn undone_count(&self) -> usize {
        self.undone_changes.len()
    }

    fn publish(&self, event: UndoRedoEvent) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}

impl<P: Clone, T> ChangeStack<P, T> {
    /// Payloads of the applied changes, in order, ready to send on save
    pub fn committable_change_list(&self) -> Vec<P> {
        self.applied_changes
            .iter()
            .map(|change| change.backend_change_object().clone())
            .collect()
    }
}

impl<P: Serialize, T> ChangeStack<P, T> {
    /// Payloads of the applied changes as a JSON array
    pub fn committable_change_list_json(&self) -> Result<serde_json::Value, UndoRedoError> {
        let payloads: Vec<&P> = self
            .applied_changes
            .iter()
            .map(ChangeRecord::backend_change_object)
            .collect();
        Ok(serde_json::to_value(payloads)?)
    }
}

impl<P, T> Default for ChangeStack<P, T> {
    fn default() -> Self {
        Self::new()
    }
}
