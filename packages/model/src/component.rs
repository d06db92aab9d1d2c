//! # Components
//!
//! A component is one visual element of a page. The set of variants is
//! closed: adding one means touching this module, the document store's
//! validation and every compiler, and each of those matches exhaustively so
//! the compiler points at every site.

use crate::attributes::{Action, Animation, Style};
use crate::error::ModelError;
use crate::record::ComponentRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, stable component identifier
///
/// Minted once when a component is created and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Mint a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Type tag of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Header,
    Text,
    Image,
    Button,
    Divider,
}

impl ComponentType {
    pub const ALL: [ComponentType; 5] = [
        ComponentType::Header,
        ComponentType::Text,
        ComponentType::Image,
        ComponentType::Button,
        ComponentType::Divider,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Header => "header",
            ComponentType::Text => "text",
            ComponentType::Image => "image",
            ComponentType::Button => "button",
            ComponentType::Divider => "divider",
        }
    }
}

impl FromStr for ComponentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ModelError::InvalidComponent(format!("unknown component type `{}`", s)))
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `tag` names one of the component variants
pub fn is_known_type(tag: &str) -> bool {
    tag.parse::<ComponentType>().is_ok()
}

/// Variant-specific attributes
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Header { content: String },
    Text { content: String },
    Image { src: String, alt: String },
    Button { content: String },
    Divider,
}

impl ComponentKind {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Header { .. } => ComponentType::Header,
            ComponentKind::Text { .. } => ComponentType::Text,
            ComponentKind::Image { .. } => ComponentType::Image,
            ComponentKind::Button { .. } => ComponentType::Button,
            ComponentKind::Divider => ComponentType::Divider,
        }
    }

    /// Build a variant from seed attributes, defaulting what the seed leaves unset.
    /// Seed fields the variant does not carry are dropped.
    pub fn from_seed(ty: ComponentType, seed: ComponentSeed) -> Self {
        let ComponentSeed { content, src, alt } = seed;
        match ty {
            ComponentType::Header => ComponentKind::Header {
                content: content.unwrap_or_default(),
            },
            ComponentType::Text => ComponentKind::Text {
                content: content.unwrap_or_default(),
            },
            ComponentType::Image => ComponentKind::Image {
                src: src.unwrap_or_default(),
                alt: alt.unwrap_or_default(),
            },
            ComponentType::Button => ComponentKind::Button {
                content: content.unwrap_or_default(),
            },
            ComponentType::Divider => ComponentKind::Divider,
        }
    }

    /// Text content, for the variants that carry it
    pub fn content(&self) -> Option<&str> {
        match self {
            ComponentKind::Header { content }
            | ComponentKind::Text { content }
            | ComponentKind::Button { content } => Some(content),
            ComponentKind::Image { .. } | ComponentKind::Divider => None,
        }
    }

    pub(crate) fn content_mut(&mut self) -> Option<&mut String> {
        match self {
            ComponentKind::Header { content }
            | ComponentKind::Text { content }
            | ComponentKind::Button { content } => Some(content),
            ComponentKind::Image { .. } | ComponentKind::Divider => None,
        }
    }
}

/// Seed attributes used when creating a component (palette defaults, wire records)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentSeed {
    pub content: Option<String>,
    pub src: Option<String>,
    pub alt: Option<String>,
}

impl ComponentSeed {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            alt: Some(alt.into()),
            ..Default::default()
        }
    }
}

/// A single page component
///
/// Serializes through [`ComponentRecord`], the persistence wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ComponentRecord", into = "ComponentRecord")]
pub struct Component {
    id: ComponentId,
    pub kind: ComponentKind,
    pub style: Style,
    pub animation: Animation,
    pub action: Action,
}

impl Component {
    /// Create a component with a freshly minted id
    pub fn new(kind: ComponentKind) -> Self {
        Self::with_id(ComponentId::generate(), kind)
    }

    /// Create a component with a known id (restored documents, tests)
    pub fn with_id(id: impl Into<ComponentId>, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            kind,
            style: Style::new(),
            animation: Animation::default(),
            action: Action::default(),
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<crate::StyleValue>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }
}

/// Create a component of type `ty` with a fresh id, filling unset attributes with defaults
pub fn create_component(ty: ComponentType, seed: ComponentSeed) -> Component {
    Component::new(ComponentKind::from_seed(ty, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionKind, AnimationKind};

    #[test]
    fn test_create_component_defaults() {
        let component = create_component(ComponentType::Header, ComponentSeed::default());

        assert_eq!(component.component_type(), ComponentType::Header);
        assert_eq!(component.kind.content(), Some(""));
        assert!(component.style.is_empty());
        assert_eq!(component.animation.kind, AnimationKind::None);
        assert_eq!(component.action.kind, ActionKind::None);
    }

    #[test]
    fn test_create_component_mints_unique_ids() {
        let a = create_component(ComponentType::Text, ComponentSeed::content("a"));
        let b = create_component(ComponentType::Text, ComponentSeed::content("a"));

        assert_ne!(a.id(), b.id());
        assert!(!a.id().as_str().is_empty());
    }

    #[test]
    fn test_seed_fields_not_carried_by_variant_are_dropped() {
        let seed = ComponentSeed {
            content: Some("ignored".to_string()),
            src: Some("https://example.com/a.png".to_string()),
            alt: None,
        };
        let image = create_component(ComponentType::Image, seed);

        assert_eq!(
            image.kind,
            ComponentKind::Image {
                src: "https://example.com/a.png".to_string(),
                alt: String::new(),
            }
        );
        assert_eq!(image.kind.content(), None);
    }

    #[test]
    fn test_is_known_type() {
        for ty in ComponentType::ALL {
            assert!(is_known_type(ty.as_str()));
        }
        assert!(!is_known_type("input"));
        assert!(!is_known_type("Header"));
        assert!(!is_known_type(""));
    }
}
