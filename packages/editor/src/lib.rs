//! # Pagecraft Editor
//!
//! Editing sessions for Pagecraft pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Component, ComponentList, Document   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: one open page                       │
//! │  - Mutations as data, one commit path       │
//! │  - Snapshot history with undo/redo          │
//! │  - Drag reorder and palette drops           │
//! │  - Save/load through a repository           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ export: Document → HTML/CSS/JS              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The live list is the history's current entry**: nothing else holds
//!    component state
//! 2. **Failed edits change nothing**: the error becomes a notice and the
//!    previous list stays live
//! 3. **One gesture, one undo step**: a drag collapses into a single entry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Editor, EditorConfig, MemoryRepository};
//! use pagecraft_model::{ComponentPatch, ComponentSeed, ComponentType};
//!
//! let mut editor = Editor::new(&EditorConfig::default());
//! let id = editor.insert_new(ComponentType::Header, ComponentSeed::content("Welcome"))?;
//! editor.patch(&id, ComponentPatch::style("color", "#1f2937"))?;
//!
//! editor.undo()?;
//!
//! editor.set_title("Landing");
//! editor.save(&mut MemoryRepository::new())?;
//! ```

mod config;
mod drag;
mod errors;
mod history;
mod mutations;
mod persistence;
mod session;

pub use config::{DragCommit, EditorConfig};
pub use drag::{component_from_drop, DragController, DragStart, DragState};
pub use errors::{Direction, EditorError};
pub use history::History;
pub use mutations::Mutation;
pub use persistence::{
    DocumentId, DocumentRepository, FileRepository, MemoryRepository, PersistenceError,
};
pub use session::{Editor, Notice, NoticeLevel};
