use pagecraft_compiler_css::{compile_to_css, CssOptions};
use pagecraft_compiler_html::{compile_to_html, HtmlOptions, Page, TAILWIND_CDN};
use pagecraft_compiler_js::{compile_to_js, JsOptions};
use pagecraft_model::{is_known_type, Document, DocumentRecord, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur during export compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Unsupported component type `{component_type}` at position {index}")]
    UnsupportedComponentType {
        index: usize,
        component_type: String,
    },

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] StoreError),
}

/// The compiled page. `html` is self-contained; `css` and `js` are the
/// same text it inlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub html: String,
    pub css: String,
    pub js: String,
}

/// Options for export compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Pretty print all three outputs
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Class of the `div` wrapping all components
    pub container_class: String,
    /// Class of the `body` element
    pub body_class: String,
    /// External stylesheets linked from `<head>`
    pub stylesheet_links: Vec<String>,
    /// Animation duration when a component sets none
    pub default_duration: String,
    /// Animation timing function when a component sets none
    pub default_timing: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            container_class: "container mx-auto px-4 py-8".to_string(),
            body_class: "bg-white".to_string(),
            stylesheet_links: vec![TAILWIND_CDN.to_string()],
            default_duration: "1s".to_string(),
            default_timing: "ease".to_string(),
        }
    }
}

impl ExportOptions {
    pub fn css_options(&self) -> CssOptions {
        CssOptions {
            pretty: self.pretty,
            indent: self.indent.clone(),
            default_duration: self.default_duration.clone(),
            default_timing: self.default_timing.clone(),
        }
    }

    pub fn js_options(&self) -> JsOptions {
        JsOptions {
            pretty: self.pretty,
            indent: self.indent.clone(),
        }
    }

    pub fn html_options(&self) -> HtmlOptions {
        HtmlOptions {
            pretty: self.pretty,
            indent: self.indent.clone(),
            container_class: self.container_class.clone(),
            body_class: self.body_class.clone(),
            stylesheet_links: self.stylesheet_links.clone(),
        }
    }
}

/// Compile a document into its publishable artifact.
///
/// Deterministic: the same document and options always produce the same
/// artifact. A typed [`Document`] cannot hold an unknown component type,
/// so this cannot fail; see [`compile_record`] for untrusted input.
#[instrument(skip_all, fields(title = %document.title, components = document.components.len()))]
pub fn compile(document: &Document, options: &ExportOptions) -> Artifact {
    let css = compile_to_css(&document.components, &options.css_options());
    let js = compile_to_js(&document.components, &options.js_options());

    let page = Page {
        title: &document.title,
        components: &document.components,
        css: &css,
        js: &js,
    };
    let html = compile_to_html(&page, &options.html_options());

    debug!(
        html = html.len(),
        css = css.len(),
        js = js.len(),
        "Compiled artifact"
    );
    Artifact { html, css, js }
}

/// Compile a document straight from its wire record.
///
/// Every component's type is checked before anything is built, so an
/// unknown type aborts the export without a partial artifact.
pub fn compile_record(record: &DocumentRecord, options: &ExportOptions) -> Result<Artifact, CompileError> {
    if let Some((index, component)) = record
        .components
        .iter()
        .enumerate()
        .find(|(_, component)| !is_known_type(&component.component_type))
    {
        return Err(CompileError::UnsupportedComponentType {
            index,
            component_type: component.component_type.clone(),
        });
    }

    let document = Document::try_from(record.clone())?;
    Ok(compile(&document, options))
}
