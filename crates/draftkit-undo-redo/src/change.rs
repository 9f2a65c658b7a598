//! Change records: a backend change description bound to its apply/reverse callbacks

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;

/// Callback that applies or reverses a change payload against a target
pub type ChangeFn<P, T> = Arc<dyn Fn(&P, &mut T) -> Result<(), BoxError> + Send + Sync>;

/// A single edit: its serialisable description plus the functions that
/// apply and reverse it on a caller-owned target.
///
/// Records are immutable once built. Cloning is cheap; the callbacks are
/// shared, the payload is cloned.
pub struct ChangeRecord<P, T> {
    backend_change_object: P,
    apply: ChangeFn<P, T>,
    reverse: ChangeFn<P, T>,
}

impl<P, T> ChangeRecord<P, T> {
    /// Bundle a payload with its apply and reverse functions.
    ///
    /// No validation is performed.
    pub fn new<A, R>(backend_change_object: P, apply: A, reverse: R) -> Self
    where
        A: Fn(&P, &mut T) -> Result<(), BoxError> + Send + Sync + 'static,
        R: Fn(&P, &mut T) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        ChangeRecord {
            backend_change_object,
            apply: Arc::new(apply),
            reverse: Arc::new(reverse),
        }
    }

    /// Build a record from already shared callbacks
    pub fn from_shared(backend_change_object: P, apply: ChangeFn<P, T>, reverse: ChangeFn<P, T>) -> Self {
        ChangeRecord {
            backend_change_object,
            apply,
            reverse,
        }
    }

    /// The change description sent to the backend on save
    pub fn backend_change_object(&self) -> &P {
        &self.backend_change_object
    }

    /// Run the apply callback against `target`
    pub fn apply_to(&self, target: &mut T) -> Result<(), BoxError> {
        (self.apply)(&self.backend_change_object, target)
    }

    /// Run the reverse callback against `target`
    pub fn reverse_on(&self, target: &mut T) -> Result<(), BoxError> {
        (self.reverse)(&self.backend_change_object, target)
    }
}

impl<P: Clone, T> Clone for ChangeRecord<P, T> {
    fn clone(&self) -> Self {
        ChangeRecord {
            backend_change_object: self.backend_change_object.clone(),
            apply: Arc::clone(&self.apply),
            reverse: Arc::clone(&self.reverse),
        }
    }
}

impl<P: fmt::Debug, T> fmt::Debug for ChangeRecord<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeRecord")
            .field("backend_change_object", &self.backend_change_object)
            .finish_non_exhaustive()
    }
}
