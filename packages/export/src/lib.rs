//! # Pagecraft Export
//!
//! Turns a finished document into a standalone page.
//!
//! ```text
//! Document ──→ compiler-css ──→ stylesheet ──┐
//!          ──→ compiler-js ───→ script ──────┼──→ compiler-html ──→ Artifact ──→ deliver()
//!          ──→ components ───────────────────┘
//! ```
//!
//! Compilation is pure; [`deliver`] is the only step that touches the
//! filesystem.

mod compile;
mod delivery;

pub use compile::{compile, compile_record, Artifact, CompileError, ExportOptions};
pub use delivery::{
    deliver, export_file_name, slugify, timestamp_suffix, write_artifact, DeliveryError,
};
