//! # Drag Reorder
//!
//! Turns pointer gestures on the canvas into reorder mutations.
//!
//! ```text
//!   Idle ──start(i)──→ Dragging { source: i } ──over(j)──→ Dragging { source: j }
//!    ↑                        │                                   │
//!    └────────── end ─────────┴───────────────────────────────────┘
//! ```
//!
//! Each `over` onto a different slot emits one `ReorderComponent` and moves
//! the source along with the dragged component, so the live list is always
//! the reordered one while the gesture runs.

use crate::{EditorError, Mutation};
use pagecraft_model::{Component, PalettePayload, StoreError};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Current index of the dragged component
        source: usize,
        /// Index the gesture started from
        origin: usize,
    },
}

/// Outcome of a drag start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStart {
    Started,
    /// A gesture was already running; the new start was dropped
    Ignored,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Begin dragging the component at `index` in a list of `len`
    pub fn start(&mut self, index: usize, len: usize) -> Result<DragStart, StoreError> {
        if let DragState::Dragging { source, .. } = self.state {
            debug!(source, index, "Drag already in progress, ignoring start");
            return Ok(DragStart::Ignored);
        }
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }

        self.state = DragState::Dragging {
            source: index,
            origin: index,
        };
        Ok(DragStart::Started)
    }

    /// The dragged component hovers over `target`. Returns the reorder to
    /// commit, or `None` when there is nothing to move.
    pub fn over(&mut self, target: usize, len: usize) -> Result<Option<Mutation>, StoreError> {
        let DragState::Dragging { source, origin } = self.state else {
            return Ok(None);
        };
        if target >= len {
            return Err(StoreError::IndexOutOfRange { index: target, len });
        }
        if target == source {
            return Ok(None);
        }

        self.state = DragState::Dragging {
            source: target,
            origin,
        };
        Ok(Some(Mutation::ReorderComponent {
            from: source,
            to: target,
        }))
    }

    /// Finish the gesture, returning the state it ended in
    pub fn end(&mut self) -> DragState {
        std::mem::take(&mut self.state)
    }
}

/// Decode a palette drop into a fresh component
pub fn component_from_drop(payload: &str) -> Result<Component, EditorError> {
    PalettePayload::parse(payload)
        .and_then(PalettePayload::into_component)
        .map_err(|e| EditorError::MalformedDropPayload(e.to_string()))
}
