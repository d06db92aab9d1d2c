//! Error types for the editor

use crate::persistence::PersistenceError;
use pagecraft_model::StoreError;
use std::fmt;
use thiserror::Error;

/// Which end of the history an undo/redo ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Undo,
    Redo,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Undo => f.write_str("undo"),
            Direction::Redo => f.write_str("redo"),
        }
    }
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Not a failure: the history has nothing further in that direction
    #[error("Nothing to {0}")]
    AtBoundary(Direction),

    #[error("Malformed drop payload: {0}")]
    MalformedDropPayload(String),

    #[error("Please enter a page title")]
    EmptyTitle,

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl EditorError {
    pub fn is_at_boundary(&self) -> bool {
        matches!(self, EditorError::AtBoundary(_))
    }
}
