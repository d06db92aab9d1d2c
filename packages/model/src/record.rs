//! # Wire Records
//!
//! The shape documents take on the wire to the persistence service:
//!
//! ```json
//! {
//!   "title": "Landing",
//!   "components": [
//!     { "type": "header", "id": "1", "content": "Hi", "style": { "color": "red" } },
//!     { "type": "button", "content": "Go", "action": { "type": "scroll", "targetId": "sec1" } }
//!   ]
//! }
//! ```
//!
//! Everything but `type` is optional. Older documents stored numeric ids and
//! the list under `layout`; both are still accepted.

use crate::attributes::{Action, ActionKind, Animation, AnimationKind, Style};
use crate::component::{Component, ComponentId, ComponentKind, ComponentSeed, ComponentType};
use crate::error::ModelError;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(rename = "type")]
    pub component_type: String,

    #[serde(
        default,
        deserialize_with = "id_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, alias = "durationMs", skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,

    #[serde(default, alias = "delayMs", skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "targetId", default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

/// A whole document as transmitted on save and returned on retrieval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub title: String,

    #[serde(default, alias = "layout")]
    pub components: Vec<ComponentRecord>,
}

impl DocumentRecord {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(|id| match id {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

impl From<AnimationRecord> for Animation {
    fn from(record: AnimationRecord) -> Self {
        let kind = match record.kind.as_deref() {
            None => AnimationKind::None,
            Some(tag) => tag.parse::<AnimationKind>().unwrap_or_else(|unknown| {
                warn!(kind = %unknown, "Unknown animation kind, treating as none");
                AnimationKind::None
            }),
        };
        Animation {
            kind,
            duration_ms: record.duration,
            delay_ms: record.delay,
            timing: record.timing,
        }
    }
}

impl From<Animation> for AnimationRecord {
    fn from(animation: Animation) -> Self {
        AnimationRecord {
            kind: Some(animation.kind.as_str().to_string()),
            duration: animation.duration_ms,
            delay: animation.delay_ms,
            timing: animation.timing,
        }
    }
}

impl From<ActionRecord> for Action {
    fn from(record: ActionRecord) -> Self {
        let kind = match record.kind.as_deref() {
            None => ActionKind::None,
            Some(tag) => tag.parse::<ActionKind>().unwrap_or_else(|unknown| {
                warn!(kind = %unknown, "Unknown action kind, treating as none");
                ActionKind::None
            }),
        };
        Action {
            kind,
            url: record.url,
            target_id: record.target_id,
        }
    }
}

impl From<Action> for ActionRecord {
    fn from(action: Action) -> Self {
        ActionRecord {
            kind: Some(action.kind.as_str().to_string()),
            url: action.url,
            target_id: action.target_id,
        }
    }
}

impl TryFrom<ComponentRecord> for Component {
    type Error = ModelError;

    fn try_from(record: ComponentRecord) -> Result<Self, Self::Error> {
        let ty: ComponentType = record.component_type.parse()?;

        let id = match record.id {
            Some(id) if id.is_empty() => {
                return Err(ModelError::InvalidComponent("empty component id".to_string()));
            }
            Some(id) => ComponentId::from(id),
            None => ComponentId::generate(),
        };

        let seed = ComponentSeed {
            content: record.content,
            src: record.src,
            alt: record.alt,
        };

        let mut component = Component::with_id(id, ComponentKind::from_seed(ty, seed));
        component.style = record.style.unwrap_or_default();
        component.animation = record.animation.map(Animation::from).unwrap_or_default();
        component.action = record.action.map(Action::from).unwrap_or_default();
        Ok(component)
    }
}

impl From<Component> for ComponentRecord {
    fn from(component: Component) -> Self {
        let mut record = ComponentRecord {
            component_type: component.component_type().as_str().to_string(),
            id: Some(component.id().as_str().to_string()),
            ..Default::default()
        };

        match component.kind {
            ComponentKind::Header { content }
            | ComponentKind::Text { content }
            | ComponentKind::Button { content } => record.content = Some(content),
            ComponentKind::Image { src, alt } => {
                record.src = Some(src);
                record.alt = Some(alt);
            }
            ComponentKind::Divider => {}
        }

        if !component.style.is_empty() {
            record.style = Some(component.style);
        }
        if !component.animation.is_none() {
            record.animation = Some(component.animation.into());
        }
        if !component.action.is_none() {
            record.action = Some(component.action.into());
        }

        record
    }
}

impl From<&Component> for ComponentRecord {
    fn from(component: &Component) -> Self {
        component.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ids_and_layout_alias() {
        let json = r#"{
            "title": "Old page",
            "layout": [
                { "type": "header", "id": 1700000000000, "content": "Hi" },
                { "type": "divider", "id": "d-1" }
            ]
        }"#;

        let record = DocumentRecord::from_json(json).unwrap();
        assert_eq!(record.title, "Old page");
        assert_eq!(record.components.len(), 2);
        assert_eq!(record.components[0].id.as_deref(), Some("1700000000000"));
        assert_eq!(record.components[1].id.as_deref(), Some("d-1"));
    }

    #[test]
    fn test_missing_id_is_minted() {
        let record = ComponentRecord {
            component_type: "text".to_string(),
            content: Some("para".to_string()),
            ..Default::default()
        };

        let component = Component::try_from(record).unwrap();
        assert!(!component.id().as_str().is_empty());
        assert_eq!(component.kind.content(), Some("para"));
    }

    #[test]
    fn test_unknown_type_is_invalid() {
        let record = ComponentRecord {
            component_type: "input".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            Component::try_from(record),
            Err(ModelError::InvalidComponent(_))
        ));
    }

    #[test]
    fn test_unknown_action_kind_decodes_as_none() {
        let json = r#"{ "type": "image", "src": "a.png", "action": { "type": "lightbox" } }"#;
        let component: Component = serde_json::from_str(json).unwrap();

        assert_eq!(component.action.kind, ActionKind::None);
    }

    #[test]
    fn test_component_serializes_in_wire_shape() {
        let component = Component::with_id(
            "b1",
            ComponentKind::Button {
                content: "Go".to_string(),
            },
        )
        .with_action(Action::scroll("sec1"));

        let value = serde_json::to_value(&component).unwrap();
        assert_eq!(value["type"], "button");
        assert_eq!(value["id"], "b1");
        assert_eq!(value["content"], "Go");
        assert_eq!(value["action"]["type"], "scroll");
        assert_eq!(value["action"]["targetId"], "sec1");
        assert!(value.get("style").is_none());
        assert!(value.get("animation").is_none());

        let back: Component = serde_json::from_value(value).unwrap();
        assert_eq!(back, component);
    }
}
