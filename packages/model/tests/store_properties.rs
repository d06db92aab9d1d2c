//! Document store invariants over operation sequences

use pagecraft_model::{
    ComponentId, ComponentKind, ComponentList, ComponentPatch, ComponentType, Component,
    ComponentSeed, StoreError, create_component,
};

fn seeded(n: usize) -> ComponentList {
    let components = (0..n).map(|i| {
        Component::with_id(
            format!("c{}", i),
            ComponentKind::Text {
                content: format!("item {}", i),
            },
        )
    });
    ComponentList::from_components(components).unwrap()
}

fn order(list: &ComponentList) -> Vec<String> {
    list.ids().map(|id| id.to_string()).collect()
}

enum Op {
    Insert,
    Reorder(usize, usize),
    Patch(usize),
    Remove(usize),
    RemoveMissing,
}

impl Op {
    /// Apply the op, returning the new list and the expected length delta
    fn run(&self, list: &ComponentList) -> Result<(ComponentList, isize), StoreError> {
        match self {
            Op::Insert => list
                .insert(create_component(ComponentType::Divider, ComponentSeed::default()))
                .map(|next| (next, 1)),
            Op::Reorder(from, to) => list.reorder(*from, *to).map(|next| (next, 0)),
            Op::Patch(index) => {
                let id = list.get_index(*index).unwrap().id().clone();
                list.patch(&id, &ComponentPatch::style("color", "red"))
                    .map(|next| (next, 0))
            }
            Op::Remove(index) => {
                let id = list.get_index(*index).unwrap().id().clone();
                list.remove(&id).map(|next| (next, -1))
            }
            Op::RemoveMissing => list
                .remove(&ComponentId::from("missing"))
                .map(|next| (next, -1)),
        }
    }
}

#[test]
fn test_length_changes_only_on_insert_and_remove() {
    let mut list = seeded(4);
    let ops = [
        Op::Insert,
        Op::Reorder(0, 3),
        Op::Patch(1),
        Op::Remove(0),
        Op::Reorder(2, 0),
        Op::RemoveMissing,
        Op::Reorder(0, 99),
    ];

    for _ in 0..3 {
        for op in &ops {
            let before = list.len() as isize;
            match op.run(&list) {
                Ok((next, delta)) => {
                    assert_eq!(next.len() as isize, before + delta);
                    list = next;
                }
                // Failing operations leave length alone too
                Err(_) => assert_eq!(list.len() as isize, before),
            }
        }
    }
}

#[test]
fn test_reorder_round_trip_restores_order() {
    let list = seeded(5);

    for i in 0..5 {
        for j in 0..5 {
            if i == j {
                continue;
            }
            let moved = list.reorder(i, j).unwrap();
            assert_ne!(order(&moved), order(&list), "move {} -> {}", i, j);
            let back = moved.reorder(j, i).unwrap();
            assert_eq!(back, list, "round trip {} -> {} -> {}", i, j, i);
        }
    }
}

#[test]
fn test_patch_preserves_identity_and_untouched_attributes() {
    let list = seeded(3);
    let id = ComponentId::from("c1");
    let before = list.get(&id).unwrap().clone();

    let patched = list
        .patch(&id, &ComponentPatch::style("padding", 12))
        .unwrap();
    let after = patched.get(&id).unwrap();

    assert_eq!(after.id(), before.id());
    assert_eq!(after.component_type(), before.component_type());
    assert_eq!(after.kind, before.kind);
    assert_eq!(after.animation, before.animation);
    assert_eq!(after.action, before.action);
    assert_eq!(
        serde_json::to_string(&after.kind.content()).unwrap(),
        serde_json::to_string(&before.kind.content()).unwrap()
    );
}
