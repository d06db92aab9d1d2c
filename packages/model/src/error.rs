//! Error types for the component model and document store

use crate::ComponentId;
use thiserror::Error;

/// Contract violations of a single component or patch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid component: {0}")]
    InvalidComponent(String),

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),
}

/// Failures of document store operations
///
/// Every failing operation leaves the input document untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Component not found: {0}")]
    NotFound(ComponentId),

    #[error("Index {index} out of range for {len} components")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type StoreResult<T> = Result<T, StoreError>;
