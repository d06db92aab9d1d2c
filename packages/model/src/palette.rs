//! Palette entries and the drag payloads they produce.
//!
//! The palette serializes an entry as JSON when a drag starts. Only `type`
//! and the seed fields are trusted; `icon` and `description` are display
//! data and ignored when the payload is dropped on the canvas.

use crate::component::{create_component, Component, ComponentSeed, ComponentType};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalettePayload {
    #[serde(rename = "type")]
    pub component_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub description: String,
}

impl PalettePayload {
    /// Parse a serialized drag payload
    pub fn parse(payload: &str) -> Result<Self, ModelError> {
        serde_json::from_str(payload)
            .map_err(|e| ModelError::InvalidComponent(format!("malformed palette payload: {}", e)))
    }

    /// Build a new component with a fresh id from this payload
    pub fn into_component(self) -> Result<Component, ModelError> {
        let ty: ComponentType = self.component_type.parse()?;
        let seed = ComponentSeed {
            content: self.content,
            src: self.src,
            alt: self.alt,
        };
        Ok(create_component(ty, seed))
    }

    pub fn to_json(&self) -> String {
        // A struct of strings cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// The entries offered in the component palette, in display order
pub fn default_palette() -> Vec<PalettePayload> {
    fn entry(ty: ComponentType, icon: &str, description: &str) -> PalettePayload {
        PalettePayload {
            component_type: ty.as_str().to_string(),
            content: None,
            src: None,
            alt: None,
            icon: icon.to_string(),
            description: description.to_string(),
        }
    }

    ComponentType::ALL
        .into_iter()
        .map(|ty| match ty {
            ComponentType::Header => PalettePayload {
                content: Some("This is a header".to_string()),
                ..entry(ty, "📝", "Add a heading to your page")
            },
            ComponentType::Text => PalettePayload {
                content: Some("This is text".to_string()),
                ..entry(ty, "📄", "Add a paragraph of text")
            },
            ComponentType::Image => PalettePayload {
                src: Some("https://via.placeholder.com/150".to_string()),
                ..entry(ty, "🖼️", "Add an image to your page")
            },
            ComponentType::Button => PalettePayload {
                content: Some("Click me".to_string()),
                ..entry(ty, "🔘", "Add a button")
            },
            ComponentType::Divider => entry(ty, "➖", "Add a horizontal line"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentKind;

    #[test]
    fn test_default_palette_covers_every_type() {
        let palette = default_palette();
        let types: Vec<_> = palette.iter().map(|p| p.component_type.as_str()).collect();
        assert_eq!(types, vec!["header", "text", "image", "button", "divider"]);
    }

    #[test]
    fn test_payload_ignores_display_fields() {
        let payload = PalettePayload::parse(
            r#"{"type": "button", "content": "Buy", "icon": "🔘", "description": "Add a button"}"#,
        )
        .unwrap();
        let component = payload.into_component().unwrap();

        assert_eq!(
            component.kind,
            ComponentKind::Button {
                content: "Buy".to_string()
            }
        );
    }

    #[test]
    fn test_payload_without_type_is_rejected() {
        assert!(PalettePayload::parse(r#"{"content": "x"}"#).is_err());
        assert!(PalettePayload::parse("not json").is_err());
    }

    #[test]
    fn test_payload_with_unknown_type_is_rejected() {
        let payload = PalettePayload::parse(r#"{"type": "input"}"#).unwrap();
        assert!(payload.into_component().is_err());
    }

    #[test]
    fn test_palette_entries_survive_the_wire() {
        for entry in default_palette() {
            let parsed = PalettePayload::parse(&entry.to_json()).unwrap();
            assert!(parsed.into_component().is_ok());
        }
    }
}
