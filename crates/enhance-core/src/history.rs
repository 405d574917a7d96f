//! Edit history: a LIFO stack of pre-transform snapshots.
//!
//! The session pushes a deep copy of its current image immediately before
//! every transform, so the stack only ever holds states the user has already
//! seen. Rollback pops the most recent snapshot; nothing else is ever removed
//! except by [`EditHistory::clear`] when a new image is loaded.

use thiserror::Error;

use crate::state::ImageState;

/// Rollback was requested while the history held no snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No earlier state to roll back to")]
pub struct NoPriorState;

/// Stack of snapshots taken before each mutating transform.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    snapshots: Vec<ImageState>,
}

impl EditHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a deep copy of `current` onto the stack.
    pub fn snapshot(&mut self, current: &ImageState) {
        self.snapshots.push(current.clone());
    }

    /// Pop and return the most recent snapshot.
    pub fn rollback(&mut self) -> Result<ImageState, NoPriorState> {
        self.snapshots.pop().ok_or(NoPriorState)
    }

    /// The snapshot a rollback would return, without removing it.
    pub fn peek(&self) -> Option<&ImageState> {
        self.snapshots.last()
    }

    /// Number of snapshots on the stack.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_rollback(&self) -> bool {
        !self.is_empty()
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
