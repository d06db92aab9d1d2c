//! Shared component attributes: style, animation and action.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scalar value of a style entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Bool(b) => write!(f, "{}", b),
            // Whole numbers render without a fractional part ("16", not "16.0")
            StyleValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(value as f64)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

/// Style mapping in insertion order (e.g. `color`, `padding`, `backgroundColor`)
pub type Style = IndexMap<String, StyleValue>;

/// Entrance animation kinds offered by the settings panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    #[default]
    None,
    Fade,
    Slide,
    Bounce,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 4] = [
        AnimationKind::None,
        AnimationKind::Fade,
        AnimationKind::Slide,
        AnimationKind::Bounce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationKind::None => "none",
            AnimationKind::Fade => "fade",
            AnimationKind::Slide => "slide",
            AnimationKind::Bounce => "bounce",
        }
    }
}

impl FromStr for AnimationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub kind: AnimationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u32>,
    /// CSS timing function (`ease`, `linear`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
}

impl Animation {
    pub fn new(kind: AnimationKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == AnimationKind::None
    }
}

/// Click behavior attached to a component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    #[default]
    None,
    Link,
    Scroll,
    Modal,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::None,
        ActionKind::Link,
        ActionKind::Scroll,
        ActionKind::Modal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::None => "none",
            ActionKind::Link => "link",
            ActionKind::Scroll => "scroll",
            ActionKind::Modal => "modal",
        }
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

impl Action {
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Link,
            url: Some(url.into()),
            target_id: None,
        }
    }

    pub fn scroll(target_id: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Scroll,
            url: None,
            target_id: Some(target_id.into()),
        }
    }

    pub fn modal(target_id: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Modal,
            url: None,
            target_id: Some(target_id.into()),
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == ActionKind::None
    }
}
