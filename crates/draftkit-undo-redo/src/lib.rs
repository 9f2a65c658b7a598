#![warn(missing_docs)]

//! Undo/Redo change stack for draftkit editors
//!
//! Editors build a [`ChangeRecord`] per edit, pairing the change description
//! sent to the backend on save with the functions that apply and reverse the
//! edit on the in-memory draft. A [`ChangeStack`] applies, undoes and redoes
//! those records against a draft the caller passes on every call.

pub mod backend_change;
pub mod change;
pub mod config;
pub mod error;
pub mod events;
pub mod history;

// Re-export public API
pub use backend_change::BackendChange;
pub use change::{ChangeFn, ChangeRecord};
pub use config::ChangeStackConfig;
pub use error::{BoxError, UndoRedoError};
pub use events::{ChangeEvents, UndoRedoEvent};
pub use history::ChangeStack;
