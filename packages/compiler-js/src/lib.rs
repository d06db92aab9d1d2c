//! # Pagecraft JS Compiler
//!
//! Behavior script for exported pages.
//!
//! - `scroll` actions get one click listener each, keyed by the component id,
//!   that smooth-scrolls the target into view
//! - `modal` actions share one generic script that toggles `hidden` on the
//!   element named by `data-modal-target`; the markup carries the attribute
//! - `link` actions are plain anchors in the markup and need no script
//!
//! A page with none of these compiles to an empty string, and the HTML
//! shell then omits its `<script>` block.

use pagecraft_model::{ActionKind, Component, ComponentList};
use tracing::debug;

/// Options for JS compilation
#[derive(Debug, Clone)]
pub struct JsOptions {
    /// Pretty print statements
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for JsOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

/// Compile the page's actions to a script
pub fn compile_to_js(components: &ComponentList, options: &JsOptions) -> String {
    let mut js = String::new();
    let mut has_modal = false;

    for component in components {
        match component.action.kind {
            ActionKind::Scroll => {
                if let Some(statement) = scroll_listener(component, options) {
                    js.push_str(&statement);
                }
            }
            ActionKind::Modal => has_modal = true,
            ActionKind::Link | ActionKind::None => {}
        }
    }

    if has_modal {
        js.push_str(&modal_script(options));
    }

    debug!(components = components.len(), bytes = js.len(), "Compiled JS");
    js
}

/// Encode `value` as a JS string literal
fn js_string(value: &str) -> String {
    // JSON strings are valid JS string literals; `</` is split so the
    // literal cannot close the surrounding <script> element
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

fn scroll_listener(component: &Component, options: &JsOptions) -> Option<String> {
    let target = component
        .action
        .target_id
        .as_deref()
        .filter(|target| !target.is_empty());
    let Some(target) = target else {
        debug!(id = %component.id(), "Scroll action without target, skipping");
        return None;
    };

    let lines = [
        format!(
            "document.getElementById({}).addEventListener('click', () => {{",
            js_string(component.id().as_str())
        ),
        format!(
            "{}document.getElementById({}).scrollIntoView({{ behavior: 'smooth' }});",
            indent(options, 1),
            js_string(target)
        ),
        "});".to_string(),
    ];
    Some(join(&lines, options))
}

fn modal_script(options: &JsOptions) -> String {
    let lines = [
        "document.querySelectorAll('[data-modal-target]').forEach((trigger) => {".to_string(),
        format!("{}trigger.addEventListener('click', () => {{", indent(options, 1)),
        format!(
            "{}const modal = document.getElementById(trigger.dataset.modalTarget);",
            indent(options, 2)
        ),
        format!("{}if (modal) {{", indent(options, 2)),
        format!("{}modal.hidden = !modal.hidden;", indent(options, 3)),
        format!("{}}}", indent(options, 2)),
        format!("{}}});", indent(options, 1)),
        "});".to_string(),
    ];
    join(&lines, options)
}

fn indent(options: &JsOptions, depth: usize) -> String {
    if options.pretty {
        options.indent.repeat(depth)
    } else {
        String::new()
    }
}

fn join(lines: &[String], options: &JsOptions) -> String {
    let separator = if options.pretty { "\n" } else { " " };
    let mut out = lines.join(separator);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{Action, ComponentKind};

    fn button(id: &str) -> Component {
        Component::with_id(
            id,
            ComponentKind::Button {
                content: "Go".to_string(),
            },
        )
    }

    fn compile(components: Vec<Component>) -> String {
        let list = ComponentList::from_components(components).unwrap();
        compile_to_js(&list, &JsOptions::default())
    }

    #[test]
    fn test_no_actions_compiles_to_nothing() {
        assert_eq!(compile(vec![button("1"), button("2")]), "");
    }

    #[test]
    fn test_scroll_listener() {
        let js = compile(vec![button("cta").with_action(Action::scroll("sec1"))]);

        println!("Generated JS:\n{}", js);

        assert!(js.contains("document.getElementById(\"cta\").addEventListener('click'"));
        assert!(js.contains("document.getElementById(\"sec1\").scrollIntoView({ behavior: 'smooth' });"));
    }

    #[test]
    fn test_one_listener_per_scroll_action() {
        let js = compile(vec![
            button("a").with_action(Action::scroll("x")),
            button("b"),
            button("c").with_action(Action::scroll("y")),
        ]);
        assert_eq!(js.matches("addEventListener").count(), 2);
        assert!(js.find("\"a\"").unwrap() < js.find("\"c\"").unwrap());
    }

    #[test]
    fn test_scroll_without_target_is_skipped() {
        let mut component = button("a");
        component.action.kind = ActionKind::Scroll;
        assert_eq!(compile(vec![component]), "");
    }

    #[test]
    fn test_link_needs_no_script() {
        let js = compile(vec![button("a").with_action(Action::link("https://example.com"))]);
        assert_eq!(js, "");
    }

    #[test]
    fn test_modal_script_emitted_once() {
        let js = compile(vec![
            button("a").with_action(Action::modal("dialog")),
            button("b").with_action(Action::modal("other")),
        ]);
        assert_eq!(js.matches("[data-modal-target]").count(), 1);
        assert!(js.contains("modal.hidden = !modal.hidden;"));
    }

    #[test]
    fn test_ids_are_escaped_as_literals() {
        let js = compile(vec![button("a").with_action(Action::scroll("x');alert(1);//</script>"))]);
        assert!(js.contains(r#"getElementById("x');alert(1);//<\/script>")"#));
    }

    #[test]
    fn test_compact_output() {
        let list =
            ComponentList::from_components(vec![button("a").with_action(Action::scroll("b"))]).unwrap();
        let js = compile_to_js(
            &list,
            &JsOptions {
                pretty: false,
                ..Default::default()
            },
        );
        assert_eq!(
            js,
            "document.getElementById(\"a\").addEventListener('click', () => { document.getElementById(\"b\").scrollIntoView({ behavior: 'smooth' }); });\n"
        );
    }
}
