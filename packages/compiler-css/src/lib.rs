//! # Pagecraft CSS Compiler
//!
//! One rule block per component, selected by `.component-<id>`, followed by
//! the `@keyframes` of every animation the page uses.

use pagecraft_model::{AnimationKind, Component, ComponentList, StyleValue};
use tracing::debug;

/// Options for CSS compilation
#[derive(Debug, Clone)]
pub struct CssOptions {
    /// Pretty print rules
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Used when an animation has no duration
    pub default_duration: String,
    /// Used when an animation has no timing function
    pub default_timing: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            default_duration: "1s".to_string(),
            default_timing: "ease".to_string(),
        }
    }
}

/// Compile the page's components to a stylesheet
pub fn compile_to_css(components: &ComponentList, options: &CssOptions) -> String {
    let mut css = String::new();

    for component in components {
        write_rule(
            &mut css,
            &format!(".component-{}", escape_identifier(component.id().as_str())),
            &declarations(component, options),
            options,
        );
    }

    for kind in used_animations(components) {
        css.push_str(&keyframes(kind, options));
    }

    debug!(components = components.len(), bytes = css.len(), "Compiled CSS");
    css
}

/// The `property: value` pairs of one component's rule block
pub fn declarations(component: &Component, options: &CssOptions) -> Vec<(String, String)> {
    let mut declarations: Vec<(String, String)> = component
        .style
        .iter()
        .filter_map(|(key, value)| {
            let property = css_property(key)?;
            let value = css_value(&property, value);
            Some((property, value))
        })
        .collect();

    let animation = &component.animation;
    if !animation.is_none() {
        let duration = animation
            .duration_ms
            .map(|ms| format!("{}ms", ms))
            .unwrap_or_else(|| options.default_duration.clone());
        let timing = animation
            .timing
            .as_deref()
            .filter(|timing| !timing.is_empty())
            .unwrap_or(options.default_timing.as_str());

        let mut value = format!("{} {} {}", animation.kind, duration, timing);
        if let Some(delay) = animation.delay_ms.filter(|delay| *delay > 0) {
            value.push_str(&format!(" {}ms", delay));
        }
        declarations.push(("animation".to_string(), value));
    }

    declarations
}

fn write_rule(css: &mut String, selector: &str, declarations: &[(String, String)], options: &CssOptions) {
    if options.pretty {
        css.push_str(&format!("{} {{\n", selector));
        for (property, value) in declarations {
            css.push_str(&format!("{}{}: {};\n", options.indent, property, value));
        }
        css.push_str("}\n");
    } else {
        css.push_str(selector);
        css.push_str(" {");
        for (property, value) in declarations {
            css.push_str(&format!(" {}: {};", property, value));
        }
        css.push_str(" }\n");
    }
}

/// Escape an id for use inside a class selector. The id never starts the
/// identifier (it follows `component-`), so leading digits need no escape.
fn escape_identifier(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for ch in id.chars() {
        match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => out.push(ch),
            '\0' => out.push('\u{FFFD}'),
            _ if ch.is_control() => out.push_str(&format!("\\{:x} ", ch as u32)),
            _ if !ch.is_ascii() => out.push(ch),
            _ => {
                out.push('\\');
                out.push(ch);
            }
        }
    }
    out
}

/// Map a style key to its CSS property. `None` for keys that are markup
/// hints rather than styles.
fn css_property(key: &str) -> Option<String> {
    match key {
        // Header level, consumed by the HTML compiler
        "size" => None,
        "alignment" => Some("text-align".to_string()),
        _ => Some(kebab_case(key)),
    }
}

/// `backgroundColor` → `background-color`
fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn css_value(property: &str, value: &StyleValue) -> String {
    match value {
        StyleValue::Number(n) if is_length_property(property) && *n != 0.0 => {
            format!("{}px", value)
        }
        StyleValue::Number(_) | StyleValue::Bool(_) | StyleValue::Text(_) => value.to_string(),
    }
}

fn is_length_property(property: &str) -> bool {
    matches!(
        property,
        "width"
            | "height"
            | "min-width"
            | "min-height"
            | "max-width"
            | "max-height"
            | "top"
            | "right"
            | "bottom"
            | "left"
            | "gap"
            | "font-size"
            | "letter-spacing"
            | "border-width"
            | "border-radius"
            | "outline-width"
    ) || property.starts_with("margin")
        || property.starts_with("padding")
}

/// Animation kinds in use, each once, in keyframe order
fn used_animations(components: &ComponentList) -> Vec<AnimationKind> {
    AnimationKind::ALL
        .into_iter()
        .filter(|kind| *kind != AnimationKind::None)
        .filter(|kind| components.iter().any(|c| c.animation.kind == *kind))
        .collect()
}

fn keyframes(kind: AnimationKind, options: &CssOptions) -> String {
    let steps: &[(&str, &str)] = match kind {
        AnimationKind::None => &[],
        AnimationKind::Fade => &[("from", "opacity: 0;"), ("to", "opacity: 1;")],
        AnimationKind::Slide => &[
            ("from", "transform: translateY(20px); opacity: 0;"),
            ("to", "transform: translateY(0); opacity: 1;"),
        ],
        AnimationKind::Bounce => &[
            ("0%, 100%", "transform: translateY(0);"),
            ("50%", "transform: translateY(-10px);"),
        ],
    };

    let mut css = String::new();
    if options.pretty {
        css.push_str(&format!("@keyframes {} {{\n", kind));
        for (selector, body) in steps {
            css.push_str(&format!("{}{} {{ {} }}\n", options.indent, selector, body));
        }
        css.push_str("}\n");
    } else {
        css.push_str(&format!("@keyframes {} {{", kind));
        for (selector, body) in steps {
            css.push_str(&format!(" {} {{ {} }}", selector, body));
        }
        css.push_str(" }\n");
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{Animation, ComponentKind};

    fn header(id: &str) -> Component {
        Component::with_id(
            id,
            ComponentKind::Header {
                content: "Hi".to_string(),
            },
        )
    }

    fn compile(components: Vec<Component>) -> String {
        let list = ComponentList::from_components(components).unwrap();
        compile_to_css(&list, &CssOptions::default())
    }

    #[test]
    fn test_selector_escapes_special_characters_in_id() {
        let css = compile(vec![header("x.y").with_style("color", "red"), header("hero:1")]);

        assert!(css.contains(".component-x\\.y {"));
        assert!(css.contains(".component-hero\\:1 {"));
        assert_eq!(escape_identifier("plain-id_9"), "plain-id_9");
        assert_eq!(escape_identifier("café"), "café");
    }

    #[test]
    fn test_compile_simple_styles() {
        let css = compile(vec![header("1")
            .with_style("color", "white")
            .with_style("backgroundColor", "#3366FF")
            .with_style("padding", 16)]);

        println!("Generated CSS:\n{}", css);

        assert!(css.contains(".component-1 {"));
        assert!(css.contains("color: white;"));
        assert!(css.contains("background-color: #3366FF;"));
        assert!(css.contains("padding: 16px;"));
    }

    #[test]
    fn test_component_without_style_still_gets_block() {
        let css = compile(vec![header("1")]);
        assert_eq!(css, ".component-1 {\n}\n");
    }

    #[test]
    fn test_rule_blocks_follow_component_order() {
        let css = compile(vec![header("b"), header("a"), header("c")]);
        let b = css.find(".component-b").unwrap();
        let a = css.find(".component-a").unwrap();
        let c = css.find(".component-c").unwrap();
        assert!(b < a && a < c);
    }

    #[test]
    fn test_markup_hints_and_aliases() {
        let css = compile(vec![header("1")
            .with_style("size", "h2")
            .with_style("alignment", "center")
            .with_style("opacity", 0.5)
            .with_style("fontWeight", 700)]);

        assert!(!css.contains("size"));
        assert!(css.contains("text-align: center;"));
        assert!(css.contains("opacity: 0.5;"));
        assert!(css.contains("font-weight: 700;"));
    }

    #[test]
    fn test_animation_defaults() {
        let css = compile(vec![header("1").with_animation(Animation::new(AnimationKind::Fade))]);
        assert!(css.contains("animation: fade 1s ease;"));
    }

    #[test]
    fn test_animation_with_all_fields() {
        let animation = Animation {
            kind: AnimationKind::Slide,
            duration_ms: Some(500),
            delay_ms: Some(200),
            timing: Some("ease-in-out".to_string()),
        };
        let css = compile(vec![header("1").with_animation(animation)]);
        assert!(css.contains("animation: slide 500ms ease-in-out 200ms;"));
    }

    #[test]
    fn test_keyframes_emitted_once_in_fixed_order() {
        let css = compile(vec![
            header("1").with_animation(Animation::new(AnimationKind::Bounce)),
            header("2").with_animation(Animation::new(AnimationKind::Fade)),
            header("3").with_animation(Animation::new(AnimationKind::Bounce)),
        ]);

        assert_eq!(css.matches("@keyframes bounce").count(), 1);
        assert!(!css.contains("@keyframes slide"));
        let fade = css.find("@keyframes fade").unwrap();
        let bounce = css.find("@keyframes bounce").unwrap();
        let last_rule = css.find(".component-3").unwrap();
        assert!(last_rule < fade && fade < bounce);
    }

    #[test]
    fn test_compact_output() {
        let list = ComponentList::from_components(vec![header("1").with_style("margin", 0)]).unwrap();
        let options = CssOptions {
            pretty: false,
            ..Default::default()
        };
        assert_eq!(compile_to_css(&list, &options), ".component-1 { margin: 0; }\n");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("backgroundColor"), "background-color");
        assert_eq!(kebab_case("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(kebab_case("font-size"), "font-size");
    }
}
