//! # Pagecraft HTML Compiler
//!
//! Markup for exported pages: one element per component inside a container
//! `div`, wrapped in a document shell that inlines the compiled stylesheet
//! and script.

mod compiler;


pub use compiler::{compile_body, compile_to_html, escape_html, HtmlOptions, Page, TAILWIND_CDN};
