//! Longer edit sequences through the editor
//!
//! This tests:
//! - Undo all the way back, then redo all the way forward
//! - Max levels under a long session
//! - Mixed drags and edits

use pagecraft_editor::{DragCommit, Editor, EditorConfig};
use pagecraft_model::{ComponentPatch, ComponentSeed, ComponentType};

fn order(editor: &Editor) -> Vec<String> {
    editor
        .components()
        .iter()
        .map(|c| c.kind.content().unwrap_or("-").to_string())
        .collect()
}

#[test]
fn test_full_undo_then_full_redo() {
    let mut editor = Editor::default();
    let mut snapshots = vec![editor.components().clone()];

    for label in ["one", "two", "three"] {
        editor
            .insert_new(ComponentType::Text, ComponentSeed::content(label))
            .unwrap();
        snapshots.push(editor.components().clone());
    }
    editor.reorder(2, 0).unwrap();
    snapshots.push(editor.components().clone());

    for expected in snapshots.iter().rev().skip(1) {
        assert_eq!(editor.undo().unwrap(), expected);
    }
    assert!(editor.undo().is_err());

    for expected in snapshots.iter().skip(1) {
        assert_eq!(editor.redo().unwrap(), expected);
    }
    assert!(editor.redo().is_err());
    assert_eq!(order(&editor), vec!["three", "one", "two"]);
}

#[test]
fn test_long_session_keeps_max_levels() {
    let config = EditorConfig {
        max_entries: 5,
        ..Default::default()
    };
    let mut editor = Editor::new(&config);
    let id = editor
        .insert_new(ComponentType::Header, ComponentSeed::content("v0"))
        .unwrap();

    for i in 1..=20 {
        editor
            .patch(&id, ComponentPatch::content(format!("v{}", i)))
            .unwrap();
    }

    let mut undone = 0;
    while editor.undo().is_ok() {
        undone += 1;
    }
    assert_eq!(undone, 5);
    assert_eq!(order(&editor), vec!["v15"]);
}

#[test]
fn test_drags_and_edits_interleaved() {
    let mut editor = Editor::default();
    let mut ids = Vec::new();
    for label in ["a", "b", "c"] {
        ids.push(
            editor
                .insert_new(ComponentType::Text, ComponentSeed::content(label))
                .unwrap(),
        );
    }

    editor.drag_start(2).unwrap();
    editor.drag_over(1).unwrap();
    editor.drag_over(0).unwrap();
    editor.drag_end();
    assert_eq!(order(&editor), vec!["c", "a", "b"]);

    editor.patch(&ids[0], ComponentPatch::content("A")).unwrap();
    assert_eq!(order(&editor), vec!["c", "A", "b"]);

    editor.undo().unwrap();
    editor.undo().unwrap();
    assert_eq!(order(&editor), vec!["a", "b", "c"]);

    editor.redo().unwrap();
    assert_eq!(order(&editor), vec!["c", "a", "b"]);
}

#[test]
fn test_per_move_drag_undoes_move_by_move() {
    let config = EditorConfig {
        drag_commit: DragCommit::PerMove,
        ..Default::default()
    };
    let mut editor = Editor::new(&config);
    for label in ["a", "b", "c"] {
        editor
            .insert_new(ComponentType::Text, ComponentSeed::content(label))
            .unwrap();
    }

    editor.drag_start(0).unwrap();
    editor.drag_over(1).unwrap();
    editor.drag_over(2).unwrap();
    editor.drag_end();

    editor.undo().unwrap();
    assert_eq!(order(&editor), vec!["b", "a", "c"]);
    editor.undo().unwrap();
    assert_eq!(order(&editor), vec!["a", "b", "c"]);
}
