use serde::{Deserialize, Serialize};

/// How a drag gesture lands in the history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragCommit {
    /// One history entry per gesture, however many moves it made
    #[default]
    PerGesture,
    /// One history entry per move
    PerMove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum undo levels kept (0 = unlimited)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    #[serde(default)]
    pub drag_commit: DragCommit,
}

fn default_max_entries() -> usize {
    100
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            drag_commit: DragCommit::default(),
        }
    }
}
