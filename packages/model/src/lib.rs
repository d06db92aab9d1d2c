//! # Pagecraft Model
//!
//! Component model and document store for Pagecraft pages.
//!
//! ```text
//! palette payload ──┐
//!                   ├─→ Component ──→ ComponentList (ordered, by id) ──→ Document
//! wire record ──────┘        ↑
//!                     ComponentPatch (sparse merge)
//! ```
//!
//! Documents are values: every store operation returns a new
//! [`ComponentList`] and leaves its input alone. The editor crate decides
//! which version is live.

mod attributes;
mod component;
mod document;
mod error;
mod palette;
mod patch;
mod record;

pub use attributes::{Action, ActionKind, Animation, AnimationKind, Style, StyleValue};
pub use component::{
    create_component, is_known_type, Component, ComponentId, ComponentKind, ComponentSeed,
    ComponentType,
};
pub use document::{ComponentList, Document};
pub use error::{ModelError, StoreError, StoreResult};
pub use palette::{default_palette, PalettePayload};
pub use patch::{apply_patch, ActionPatch, AnimationPatch, ComponentPatch};
pub use record::{ActionRecord, AnimationRecord, ComponentRecord, DocumentRecord};
