//! # Document Store
//!
//! An ordered component list with lookup by id. Order is the vertical
//! render order.
//!
//! Every operation takes `&self` and returns a new list; nothing here
//! mutates in place. Components are shared between versions behind `Arc`,
//! so a patch copies only the component it touches and history snapshots
//! stay cheap.

use crate::component::{Component, ComponentId, ComponentKind};
use crate::error::{ModelError, StoreError, StoreResult};
use crate::patch::{apply_patch, ComponentPatch};
use crate::record::{ComponentRecord, DocumentRecord};
use indexmap::IndexMap;
use std::sync::Arc;

/// Ordered, id-indexed component sequence
#[derive(Debug, Clone, Default)]
pub struct ComponentList {
    components: IndexMap<ComponentId, Arc<Component>>,
}

impl PartialEq for ComponentList {
    // IndexMap equality ignores order; here order is part of the value
    fn eq(&self, other: &Self) -> bool {
        self.components.len() == other.components.len()
            && self
                .components
                .values()
                .zip(other.components.values())
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}

impl ComponentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from components in order, validating each as an insert would
    pub fn from_components(components: impl IntoIterator<Item = Component>) -> StoreResult<Self> {
        components
            .into_iter()
            .try_fold(Self::new(), |list, component| list.insert(component))
    }

    /// Rebuild a saved list. Ids must be non-empty and unique; required
    /// fields are not checked, so documents saved before a field became
    /// required still open and export.
    pub fn restore(components: impl IntoIterator<Item = Component>) -> StoreResult<Self> {
        let mut list = Self::new();
        for component in components {
            check_identity(&list, &component)?;
            list.components
                .insert(component.id().clone(), Arc::new(component));
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, id: &ComponentId) -> Option<&Component> {
        self.components.get(id).map(Arc::as_ref)
    }

    pub fn get_index(&self, index: usize) -> Option<&Component> {
        self.components.get_index(index).map(|(_, c)| c.as_ref())
    }

    pub fn position(&self, id: &ComponentId) -> Option<usize> {
        self.components.get_index_of(id)
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.components.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> + '_ {
        self.components.values().map(Arc::as_ref)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ComponentId> + '_ {
        self.components.keys()
    }

    /// Append `component` at the end
    pub fn insert(&self, component: Component) -> StoreResult<Self> {
        check_identity(self, &component)?;
        check_required(&component)?;

        let mut next = self.clone();
        next.components
            .insert(component.id().clone(), Arc::new(component));
        Ok(next)
    }

    /// Merge `patch` into the component with `id`; order and all other components unchanged
    pub fn patch(&self, id: &ComponentId, patch: &ComponentPatch) -> StoreResult<Self> {
        let current = self
            .components
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let patched = apply_patch(current, patch)?;
        // A restored component may already lack a required field; it can
        // still be edited, but a complete one cannot be made incomplete
        if check_required(current).is_ok() {
            check_required(&patched)?;
        }

        let mut next = self.clone();
        if let Some(slot) = next.components.get_mut(id) {
            *slot = Arc::new(patched);
        }
        Ok(next)
    }

    /// Remove exactly one component, keeping the order of the rest
    pub fn remove(&self, id: &ComponentId) -> StoreResult<Self> {
        if !self.components.contains_key(id) {
            return Err(StoreError::NotFound(id.clone()));
        }

        let mut next = self.clone();
        next.components.shift_remove(id);
        Ok(next)
    }

    /// Move the component at `from` to position `to`, shifting the ones in between
    pub fn reorder(&self, from: usize, to: usize) -> StoreResult<Self> {
        let len = self.components.len();
        for index in [from, to] {
            if index >= len {
                return Err(StoreError::IndexOutOfRange { index, len });
            }
        }

        let mut next = self.clone();
        if from != to {
            next.components.move_index(from, to);
        }
        Ok(next)
    }

    pub fn to_records(&self) -> Vec<ComponentRecord> {
        self.iter().map(ComponentRecord::from).collect()
    }
}

fn check_identity(list: &ComponentList, component: &Component) -> Result<(), ModelError> {
    let id = component.id().as_str();
    if id.is_empty() {
        return Err(ModelError::InvalidComponent("empty component id".to_string()));
    }
    // Ids become part of a class attribute
    if id.chars().any(char::is_whitespace) {
        return Err(ModelError::InvalidComponent(format!(
            "component id `{}` contains whitespace",
            id
        )));
    }
    if list.contains(component.id()) {
        return Err(ModelError::InvalidComponent(format!(
            "duplicate component id {}",
            component.id()
        )));
    }
    Ok(())
}

/// Required fields of a component produced by an edit
fn check_required(component: &Component) -> Result<(), ModelError> {
    match &component.kind {
        ComponentKind::Image { src, .. } if src.trim().is_empty() => Err(
            ModelError::InvalidComponent(format!("image {} has no src", component.id())),
        ),
        ComponentKind::Image { .. }
        | ComponentKind::Header { .. }
        | ComponentKind::Text { .. }
        | ComponentKind::Button { .. }
        | ComponentKind::Divider => Ok(()),
    }
}

impl<'a> IntoIterator for &'a ComponentList {
    type Item = &'a Component;
    type IntoIter = Box<dyn Iterator<Item = &'a Component> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// One buildable page: a title and its ordered components
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub components: ComponentList,
}

impl Document {
    /// Empty document with an empty title
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(title: impl Into<String>, components: ComponentList) -> Self {
        Self {
            title: title.into(),
            components,
        }
    }

    pub fn insert(&self, component: Component) -> StoreResult<Self> {
        Ok(self.with_list(self.components.insert(component)?))
    }

    pub fn patch(&self, id: &ComponentId, patch: &ComponentPatch) -> StoreResult<Self> {
        Ok(self.with_list(self.components.patch(id, patch)?))
    }

    pub fn remove(&self, id: &ComponentId) -> StoreResult<Self> {
        Ok(self.with_list(self.components.remove(id)?))
    }

    pub fn reorder(&self, from: usize, to: usize) -> StoreResult<Self> {
        Ok(self.with_list(self.components.reorder(from, to)?))
    }

    fn with_list(&self, components: ComponentList) -> Self {
        Self {
            title: self.title.clone(),
            components,
        }
    }

    pub fn to_record(&self) -> DocumentRecord {
        DocumentRecord {
            title: self.title.clone(),
            components: self.components.to_records(),
        }
    }
}

impl TryFrom<DocumentRecord> for Document {
    type Error = StoreError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        let components = record
            .components
            .into_iter()
            .map(Component::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title: record.title,
            components: ComponentList::restore(components)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str) -> Component {
        Component::with_id(
            id,
            ComponentKind::Text {
                content: id.to_uppercase(),
            },
        )
    }

    fn list(ids: &[&str]) -> ComponentList {
        ComponentList::from_components(ids.iter().map(|id| text(id))).unwrap()
    }

    fn order(list: &ComponentList) -> Vec<&str> {
        list.ids().map(ComponentId::as_str).collect()
    }

    #[test]
    fn test_insert_appends() {
        let next = list(&["a", "b"]).insert(text("c")).unwrap();
        assert_eq!(order(&next), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insert_leaves_input_untouched() {
        let original = list(&["a"]);
        let _ = original.insert(text("b")).unwrap();
        assert_eq!(order(&original), vec!["a"]);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let err = list(&["a"]).insert(text("a")).unwrap_err();
        assert!(matches!(err, StoreError::Model(ModelError::InvalidComponent(_))));
    }

    #[test]
    fn test_ids_with_whitespace_are_rejected() {
        let err = ComponentList::new().insert(text("a b")).unwrap_err();
        assert!(matches!(err, StoreError::Model(ModelError::InvalidComponent(_))));
        assert!(ComponentList::restore(vec![text("x\ty")]).is_err());
    }

    #[test]
    fn test_insert_rejects_image_without_src() {
        let image = Component::with_id(
            "img",
            ComponentKind::Image {
                src: String::new(),
                alt: String::new(),
            },
        );
        let err = ComponentList::new().insert(image).unwrap_err();
        assert!(matches!(err, StoreError::Model(ModelError::InvalidComponent(_))));
    }

    #[test]
    fn test_patch_replaces_only_target() {
        let original = list(&["a", "b", "c"]);
        let next = original
            .patch(&ComponentId::from("b"), &ComponentPatch::content("bee"))
            .unwrap();

        assert_eq!(order(&next), vec!["a", "b", "c"]);
        assert_eq!(next.get(&"b".into()).unwrap().kind.content(), Some("bee"));
        assert_eq!(next.get(&"a".into()), original.get(&"a".into()));
        assert_eq!(next.get(&"c".into()), original.get(&"c".into()));
    }

    #[test]
    fn test_patch_cannot_clear_image_src() {
        let image = Component::with_id(
            "img",
            ComponentKind::Image {
                src: "a.png".to_string(),
                alt: String::new(),
            },
        );
        let original = ComponentList::new().insert(image).unwrap();

        let err = original
            .patch(&ComponentId::from("img"), &ComponentPatch::src(""))
            .unwrap_err();

        assert!(matches!(err, StoreError::Model(ModelError::InvalidComponent(_))));
        assert_eq!(
            original.get(&"img".into()).unwrap().kind,
            ComponentKind::Image {
                src: "a.png".to_string(),
                alt: String::new(),
            }
        );
    }

    #[test]
    fn test_patch_missing_id() {
        let err = list(&["a"])
            .patch(&ComponentId::from("zzz"), &ComponentPatch::content("x"))
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound(ComponentId::from("zzz")));
    }

    #[test]
    fn test_remove_keeps_order() {
        let next = list(&["a", "b", "c", "d"]).remove(&"b".into()).unwrap();
        assert_eq!(order(&next), vec!["a", "c", "d"]);

        let err = next.remove(&"b".into()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_reorder_moves_and_shifts() {
        let original = list(&["a", "b", "c", "d"]);

        assert_eq!(order(&original.reorder(0, 2).unwrap()), vec!["b", "c", "a", "d"]);
        assert_eq!(order(&original.reorder(3, 1).unwrap()), vec!["a", "d", "b", "c"]);
        assert_eq!(original.reorder(2, 2).unwrap(), original);
    }

    #[test]
    fn test_reorder_out_of_range() {
        let original = list(&["a", "b"]);

        assert_eq!(
            original.reorder(0, 2).unwrap_err(),
            StoreError::IndexOutOfRange { index: 2, len: 2 }
        );
        assert_eq!(
            original.reorder(5, 0).unwrap_err(),
            StoreError::IndexOutOfRange { index: 5, len: 2 }
        );
        assert!(ComponentList::new().reorder(0, 0).is_err());
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        assert_ne!(list(&["a", "b"]), list(&["b", "a"]));
        assert_eq!(list(&["a", "b"]), list(&["a", "b"]));
    }

    #[test]
    fn test_document_record_round_trip() {
        let document = Document::with_components("Landing", list(&["a", "b"]));
        let restored = Document::try_from(document.to_record()).unwrap();
        assert_eq!(restored, document);
    }

    #[test]
    fn test_saved_image_without_src_still_restores() {
        let record =
            DocumentRecord::from_json(r#"{"title": "t", "components": [{"type": "image", "id": "1"}]}"#)
                .unwrap();

        let document = Document::try_from(record).unwrap();

        assert_eq!(
            document.components.get(&"1".into()).unwrap().kind,
            ComponentKind::Image {
                src: String::new(),
                alt: String::new(),
            }
        );
    }

    #[test]
    fn test_restored_incomplete_image_stays_editable() {
        let record =
            DocumentRecord::from_json(r#"{"title": "t", "components": [{"type": "image", "id": "1"}]}"#)
                .unwrap();
        let document = Document::try_from(record).unwrap();

        let alt = ComponentPatch {
            alt: Some("Logo".to_string()),
            ..Default::default()
        };
        let next = document.patch(&"1".into(), &alt).unwrap();
        let fixed = next.patch(&"1".into(), &ComponentPatch::src("logo.png")).unwrap();

        assert!(fixed.patch(&"1".into(), &ComponentPatch::src("")).is_err());
    }

    #[test]
    fn test_document_record_with_duplicate_ids_is_rejected() {
        let json = r#"{"title": "t", "components": [
            {"type": "text", "id": "x"},
            {"type": "text", "id": "x"}
        ]}"#;
        let record = DocumentRecord::from_json(json).unwrap();
        assert!(Document::try_from(record).is_err());
    }
}
