//! # Attribute Patches
//!
//! Patches are sparse: a field left as `None` keeps its current value.
//! `style`, `animation` and `action` merge key by key instead of replacing
//! the whole nested value. A `null` style entry removes that property.
//!
//! The type of a component is fixed at creation; a patch naming a different
//! type is rejected, as is one that sets a field the variant does not carry.

use crate::attributes::{Action, ActionKind, Animation, AnimationKind, StyleValue};
use crate::component::{Component, ComponentKind};
use crate::error::ModelError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sparse attribute update produced by the settings panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<IndexMap<String, Option<StyleValue>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationPatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnimationKind>,

    #[serde(
        rename = "duration",
        alias = "durationMs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_ms: Option<u32>,

    #[serde(
        rename = "delay",
        alias = "delayMs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delay_ms: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ActionKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "targetId", default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

impl From<Animation> for AnimationPatch {
    /// A patch that sets every animation field
    fn from(animation: Animation) -> Self {
        Self {
            kind: Some(animation.kind),
            duration_ms: animation.duration_ms,
            delay_ms: animation.delay_ms,
            timing: animation.timing,
        }
    }
}

impl From<Action> for ActionPatch {
    /// A patch that sets every action field
    fn from(action: Action) -> Self {
        Self {
            kind: Some(action.kind),
            url: action.url,
            target_id: action.target_id,
        }
    }
}

impl ComponentPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn src(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Default::default()
        }
    }

    pub fn style(property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        Self::default().with_style(property, value)
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.style
            .get_or_insert_with(IndexMap::new)
            .insert(property.into(), Some(value.into()));
        self
    }

    pub fn without_style(mut self, property: impl Into<String>) -> Self {
        self.style
            .get_or_insert_with(IndexMap::new)
            .insert(property.into(), None);
        self
    }

    pub fn with_animation(mut self, animation: AnimationPatch) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_action(mut self, action: ActionPatch) -> Self {
        self.action = Some(action);
        self
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Merge `patch` into a copy of `component`
pub fn apply_patch(component: &Component, patch: &ComponentPatch) -> Result<Component, ModelError> {
    let ty = component.component_type();

    if let Some(requested) = &patch.component_type {
        if requested != ty.as_str() {
            return Err(ModelError::InvalidPatch(format!(
                "cannot change type of component {} from `{}` to `{}`",
                component.id(),
                ty,
                requested
            )));
        }
    }

    let mut next = component.clone();

    if let Some(content) = &patch.content {
        let slot = next.kind.content_mut().ok_or_else(|| {
            ModelError::InvalidPatch(format!("`{}` components have no content", ty))
        })?;
        *slot = content.clone();
    }

    if patch.src.is_some() || patch.alt.is_some() {
        match &mut next.kind {
            ComponentKind::Image { src, alt } => {
                if let Some(new_src) = &patch.src {
                    *src = new_src.clone();
                }
                if let Some(new_alt) = &patch.alt {
                    *alt = new_alt.clone();
                }
            }
            ComponentKind::Header { .. }
            | ComponentKind::Text { .. }
            | ComponentKind::Button { .. }
            | ComponentKind::Divider => {
                return Err(ModelError::InvalidPatch(format!(
                    "`{}` components have no src/alt",
                    ty
                )));
            }
        }
    }

    if let Some(style) = &patch.style {
        for (property, value) in style {
            match value {
                Some(value) => {
                    next.style.insert(property.clone(), value.clone());
                }
                None => {
                    next.style.shift_remove(property);
                }
            }
        }
    }

    if let Some(animation) = &patch.animation {
        if let Some(kind) = animation.kind {
            next.animation.kind = kind;
        }
        if let Some(duration) = animation.duration_ms {
            next.animation.duration_ms = Some(duration);
        }
        if let Some(delay) = animation.delay_ms {
            next.animation.delay_ms = Some(delay);
        }
        if let Some(timing) = &animation.timing {
            next.animation.timing = Some(timing.clone());
        }
    }

    if let Some(action) = &patch.action {
        if let Some(kind) = action.kind {
            next.action.kind = kind;
        }
        if let Some(url) = &action.url {
            next.action.url = Some(url.clone());
        }
        if let Some(target_id) = &action.target_id {
            next.action.target_id = Some(target_id.clone());
        }
    }

    Ok(next)
}
