use pagecraft_model::{ActionKind, Component, ComponentKind, ComponentList, StyleValue};
use std::collections::HashSet;
use tracing::debug;

/// Stylesheet the exported shell links by default
pub const TAILWIND_CDN: &str = "https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css";

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Class of the `div` wrapping all components
    pub container_class: String,
    /// Class of the `body` element
    pub body_class: String,
    /// External stylesheets linked from `<head>`
    pub stylesheet_links: Vec<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            container_class: "container mx-auto px-4 py-8".to_string(),
            body_class: "bg-white".to_string(),
            stylesheet_links: vec![TAILWIND_CDN.to_string()],
        }
    }
}

/// Everything the document shell embeds
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub title: &'a str,
    pub components: &'a ComponentList,
    /// Inlined into `<style>`
    pub css: &'a str,
    /// Inlined into `<script>`; no block when empty
    pub js: &'a str,
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    /// Add a preformatted block (stylesheet, script) line by line
    fn add_block(&mut self, block: &str) {
        for line in block.lines().filter(|line| !line.trim().is_empty()) {
            self.add_line(line);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a page to a standalone HTML document
pub fn compile_to_html(page: &Page<'_>, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(page, &mut ctx);

    ctx.add_line(&format!(
        "<body class=\"{}\">",
        escape_html(&options.body_class)
    ));
    ctx.indent();

    compile_container(page.components, &mut ctx);

    if !page.js.trim().is_empty() {
        ctx.add_line("<script>");
        ctx.indent();
        ctx.add_block(page.js);
        ctx.dedent();
        ctx.add_line("</script>");
    }

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    debug!(components = page.components.len(), "Compiled HTML");
    ctx.get_output()
}

/// Compile only the component markup, wrapped in its container
pub fn compile_body(components: &ComponentList, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    compile_container(components, &mut ctx);
    ctx.get_output()
}

fn compile_head(page: &Page<'_>, ctx: &mut Context<'_>) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(page.title)));

    let options = ctx.options;
    for href in &options.stylesheet_links {
        ctx.add_line(&format!(
            "<link href=\"{}\" rel=\"stylesheet\">",
            escape_html(href)
        ));
    }

    ctx.add_line("<style>");
    ctx.indent();
    // A style value must not be able to close the element
    ctx.add_block(&page.css.replace("</", "<\\/"));
    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_container(components: &ComponentList, ctx: &mut Context<'_>) {
    let options = ctx.options;
    ctx.add_line(&format!(
        "<div class=\"{}\">",
        escape_html(&options.container_class)
    ));
    ctx.indent();

    let modal_targets = modal_targets(components);
    for component in components {
        compile_component(component, &modal_targets, ctx);
    }

    ctx.dedent();
    ctx.add_line("</div>");
}

/// Ids that some modal action opens; those start hidden
fn modal_targets(components: &ComponentList) -> HashSet<&str> {
    components
        .iter()
        .filter(|c| c.action.kind == ActionKind::Modal)
        .filter_map(|c| c.action.target_id.as_deref())
        .filter(|target| !target.is_empty())
        .collect()
}

fn compile_component(component: &Component, modal_targets: &HashSet<&str>, ctx: &mut Context<'_>) {
    let mut attributes = vec![
        ("id", component.id().to_string()),
        ("class", format!("component-{}", component.id())),
    ];

    match &component.kind {
        ComponentKind::Image { src, alt } => {
            attributes.push(("src", src.clone()));
            attributes.push(("alt", alt.clone()));
        }
        ComponentKind::Header { .. }
        | ComponentKind::Text { .. }
        | ComponentKind::Button { .. }
        | ComponentKind::Divider => {}
    }

    let action = &component.action;
    match action.kind {
        ActionKind::Modal => {
            if let Some(target) = action.target_id.as_deref().filter(|t| !t.is_empty()) {
                attributes.push(("data-modal-target", target.to_string()));
            }
        }
        ActionKind::Link | ActionKind::Scroll | ActionKind::None => {}
    }

    let mut tag = open_tag(tag_name(component), &attributes);
    if modal_targets.contains(component.id().as_str()) {
        tag.insert_str(tag.len() - 1, " hidden");
    }

    let element = match &component.kind {
        ComponentKind::Header { content }
        | ComponentKind::Text { content }
        | ComponentKind::Button { content } => {
            format!("{}{}</{}>", tag, escape_html(content), tag_name(component))
        }
        ComponentKind::Image { .. } | ComponentKind::Divider => {
            tag.insert_str(tag.len() - 1, " /");
            tag
        }
    };

    let href = match action.kind {
        ActionKind::Link => action.url.as_deref().filter(|url| !url.is_empty()),
        ActionKind::Scroll | ActionKind::Modal | ActionKind::None => None,
    };

    match href {
        Some(href) => {
            ctx.add_line(&format!("<a href=\"{}\">", escape_html(href)));
            ctx.indent();
            ctx.add_line(&element);
            ctx.dedent();
            ctx.add_line("</a>");
        }
        None => ctx.add_line(&element),
    }
}

fn open_tag(name: &str, attributes: &[(&str, String)]) -> String {
    let mut tag = format!("<{}", name);
    for (attr_name, value) in attributes {
        tag.push_str(&format!(" {}=\"{}\"", attr_name, escape_html(value)));
    }
    tag.push('>');
    tag
}

fn tag_name(component: &Component) -> &'static str {
    match &component.kind {
        ComponentKind::Header { .. } => heading_level(component.style.get("size")),
        ComponentKind::Text { .. } => "p",
        ComponentKind::Image { .. } => "img",
        ComponentKind::Button { .. } => "button",
        ComponentKind::Divider => "hr",
    }
}

/// `h1`..`h3` from the header's `size` hint
fn heading_level(size: Option<&StyleValue>) -> &'static str {
    let level = match size {
        Some(StyleValue::Text(size)) => size.trim().trim_start_matches('h').parse::<u8>().ok(),
        Some(StyleValue::Number(n)) => Some(*n as u8),
        Some(StyleValue::Bool(_)) | None => None,
    };
    match level {
        Some(2) => "h2",
        Some(3) => "h3",
        _ => "h1",
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
