//! # Edit Session
//!
//! One open page: its title, its history, the drag gesture in flight and
//! the notices raised for the user.
//!
//! Every change to the component list goes through [`Editor::apply`]. It
//! computes the next list, commits it to the history on success, and on
//! failure logs, raises a notice and leaves the live list as it was.

use crate::config::{DragCommit, EditorConfig};
use crate::drag::{component_from_drop, DragController, DragStart, DragState};
use crate::history::History;
use crate::persistence::{DocumentId, DocumentRepository};
use crate::{EditorError, Mutation};
use pagecraft_model::{
    Component, ComponentId, ComponentList, ComponentPatch, ComponentSeed, ComponentType,
    Document, create_component,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message meant for the person editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub struct Editor {
    title: String,
    history: History,
    drag: DragController,
    drag_commit: DragCommit,

    /// Id assigned by the repository on first save
    document_id: Option<DocumentId>,

    notices: Vec<Notice>,
}

impl Editor {
    /// Start on an empty, untitled page
    pub fn new(config: &EditorConfig) -> Self {
        Self::open(Document::new(), config)
    }

    /// Start editing an existing document with a fresh history
    pub fn open(document: Document, config: &EditorConfig) -> Self {
        Self {
            title: document.title,
            history: History::with_max_levels(document.components, config.max_entries),
            drag: DragController::new(),
            drag_commit: config.drag_commit,
            document_id: None,
            notices: Vec::new(),
        }
    }

    /// Load a saved document from `repository`
    pub fn load(
        repository: &dyn DocumentRepository,
        id: &DocumentId,
        config: &EditorConfig,
    ) -> Result<Self, EditorError> {
        let record = repository.load(id)?;
        let document = Document::try_from(record)?;
        info!(id = %id, components = document.components.len(), "Opened document");

        let mut editor = Self::open(document, config);
        editor.document_id = Some(id.clone());
        Ok(editor)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rename the page. Not recorded in the history.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The live component list
    pub fn components(&self) -> &ComponentList {
        self.history.current()
    }

    /// Snapshot of the page as it stands
    pub fn document(&self) -> Document {
        Document::with_components(self.title.clone(), self.components().clone())
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.document_id.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply one edit and commit the result. An edit that is not part of a
    /// drag ends any gesture in flight first, so it gets its own undo step.
    pub fn apply(&mut self, mutation: Mutation) -> Result<&ComponentList, EditorError> {
        self.finish_drag();
        self.commit(mutation)
    }

    fn commit(&mut self, mutation: Mutation) -> Result<&ComponentList, EditorError> {
        match mutation.apply(self.history.current()) {
            Ok(next) => {
                debug!(mutation = mutation.name(), "Applied edit");
                self.history.commit(next);
                Ok(self.history.current())
            }
            Err(e) => {
                warn!(mutation = mutation.name(), error = %e, "Rejected edit");
                self.notices.push(Notice::warning(e.to_string()));
                Err(e.into())
            }
        }
    }

    pub fn insert(&mut self, component: Component) -> Result<ComponentId, EditorError> {
        let id = component.id().clone();
        self.apply(Mutation::InsertComponent { component })?;
        Ok(id)
    }

    /// Create a component of `ty` with defaults and append it
    pub fn insert_new(
        &mut self,
        ty: ComponentType,
        seed: ComponentSeed,
    ) -> Result<ComponentId, EditorError> {
        self.insert(create_component(ty, seed))
    }

    pub fn patch(&mut self, id: &ComponentId, patch: ComponentPatch) -> Result<(), EditorError> {
        self.apply(Mutation::PatchComponent {
            id: id.clone(),
            patch,
        })?;
        Ok(())
    }

    pub fn remove(&mut self, id: &ComponentId) -> Result<(), EditorError> {
        self.apply(Mutation::RemoveComponent { id: id.clone() })?;
        Ok(())
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        self.apply(Mutation::ReorderComponent { from, to })?;
        Ok(())
    }

    pub fn undo(&mut self) -> Result<&ComponentList, EditorError> {
        self.finish_drag();
        let result = self.history.undo();
        if let Err(e) = &result {
            debug!("{}", e);
        }
        result
    }

    pub fn redo(&mut self) -> Result<&ComponentList, EditorError> {
        self.finish_drag();
        let result = self.history.redo();
        if let Err(e) = &result {
            debug!("{}", e);
        }
        result
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Pick up the component at `index`
    pub fn drag_start(&mut self, index: usize) -> Result<(), EditorError> {
        match self.drag.start(index, self.components().len()) {
            Ok(DragStart::Started) => {
                if self.drag_commit == DragCommit::PerGesture {
                    self.history.begin_batch();
                }
                Ok(())
            }
            Ok(DragStart::Ignored) => Ok(()),
            Err(e) => {
                warn!(index, error = %e, "Rejected drag start");
                self.notices.push(Notice::warning(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// The dragged component is over slot `target`. Returns whether the
    /// list changed.
    pub fn drag_over(&mut self, target: usize) -> Result<bool, EditorError> {
        match self.drag.over(target, self.components().len()) {
            Ok(Some(mutation)) => {
                self.commit(mutation)?;
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                debug!(target, error = %e, "Drag over invalid slot");
                Err(e.into())
            }
        }
    }

    pub fn drag_end(&mut self) {
        self.finish_drag();
    }

    fn finish_drag(&mut self) {
        if let DragState::Dragging { source, origin } = self.drag.end() {
            debug!(origin, source, "Drag finished");
        }
        self.history.end_batch();
    }

    /// A palette entry was dropped on the canvas
    pub fn handle_drop(&mut self, payload: &str) -> Result<ComponentId, EditorError> {
        let component = match component_from_drop(payload) {
            Ok(component) => component,
            Err(e) => {
                warn!(error = %e, "Ignoring drop");
                self.notices
                    .push(Notice::error("Could not add component from drop"));
                return Err(e);
            }
        };
        self.insert(component)
    }

    /// Save through `repository`: the first save creates the document,
    /// later ones update it
    pub fn save(&mut self, repository: &mut dyn DocumentRepository) -> Result<DocumentId, EditorError> {
        if self.title.trim().is_empty() {
            self.notices.push(Notice::warning(EditorError::EmptyTitle.to_string()));
            return Err(EditorError::EmptyTitle);
        }

        let record = self.document().to_record();
        let result = match &self.document_id {
            Some(id) => repository.update(id, &record).map(|_| id.clone()),
            None => repository.create(&record),
        };

        match result {
            Ok(id) => {
                info!(id = %id, title = %self.title, "Saved page");
                self.document_id = Some(id.clone());
                self.notices.push(Notice::info("Page saved successfully!"));
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "Save failed");
                self.notices.push(Notice::error("Failed to save page"));
                Err(e.into())
            }
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand the pending notices to the caller
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
