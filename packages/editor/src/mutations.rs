//! # Mutations
//!
//! Edits expressed as data. Every editing path (settings form, inline text
//! edit, drag reorder, palette drop) is turned into one of these and then
//! committed through the [`Editor`](crate::Editor).
//!
//! Applying a mutation never touches its input: it returns the next
//! component list or an error, and on error the caller keeps the old list.

use pagecraft_model::{Component, ComponentId, ComponentList, ComponentPatch, StoreResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a component at the end of the page
    InsertComponent { component: Component },

    /// Merge a sparse attribute patch into one component
    PatchComponent { id: ComponentId, patch: ComponentPatch },

    /// Remove one component
    RemoveComponent { id: ComponentId },

    /// Move the component at `from` to `to`, shifting the ones in between
    ReorderComponent { from: usize, to: usize },
}

impl Mutation {
    /// Compute the component list this mutation produces from `components`
    pub fn apply(&self, components: &ComponentList) -> StoreResult<ComponentList> {
        match self {
            Mutation::InsertComponent { component } => components.insert(component.clone()),
            Mutation::PatchComponent { id, patch } => components.patch(id, patch),
            Mutation::RemoveComponent { id } => components.remove(id),
            Mutation::ReorderComponent { from, to } => components.reorder(*from, *to),
        }
    }

    /// Debug name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertComponent { .. } => "insert",
            Mutation::PatchComponent { .. } => "patch",
            Mutation::RemoveComponent { .. } => "remove",
            Mutation::ReorderComponent { .. } => "reorder",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{ComponentKind, StoreError};

    fn text(id: &str) -> Component {
        Component::with_id(
            id,
            ComponentKind::Text {
                content: String::new(),
            },
        )
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::PatchComponent {
            id: ComponentId::from("text-123"),
            patch: ComponentPatch::content("Hello World"),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_apply_does_not_touch_input() {
        let components = ComponentList::new().insert(text("a")).unwrap();

        let next = Mutation::InsertComponent {
            component: text("b"),
        }
        .apply(&components)
        .unwrap();

        assert_eq!(components.len(), 1);
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_failed_apply_reports_store_error() {
        let components = ComponentList::new().insert(text("a")).unwrap();

        let result = Mutation::RemoveComponent {
            id: ComponentId::from(""),
        }
        .apply(&components);

        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
