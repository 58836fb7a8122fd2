use crate::domain::{Task, TaskId};
use crate::error::Result;
use crate::storage::Storage;
use crate::store::TaskStore;
use crate::view::route::Route;
use tracing::debug;

/// Editor for a single task, addressed by the id text from the route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDetailView {
    Editing { draft: Task, statuses: Vec<String> },
    NotFound { requested: String },
}

impl TaskDetailView {
    pub const NOT_FOUND_MESSAGE: &'static str = "Task not found";

    /// Opens the editor on a copy of the task held by the store
    pub fn open<S: Storage>(store: &TaskStore<S>, id: &str) -> Self {
        let found = id.parse::<TaskId>().ok().and_then(|id| store.task(id));
        match found {
            Some(task) => Self::Editing {
                draft: task.clone(),
                statuses: store.board().statuses().iter().map(String::from).collect(),
            },
            None => {
                debug!(id, "detail view opened for unknown task");
                Self::NotFound {
                    requested: id.to_string(),
                }
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn draft(&self) -> Option<&Task> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            Self::NotFound { .. } => None,
        }
    }

    /// Statuses the draft may be moved to
    pub fn status_choices(&self) -> &[String] {
        match self {
            Self::Editing { statuses, .. } => statuses,
            Self::NotFound { .. } => &[],
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Self::Editing { draft, .. } = self {
            draft.set_title(title);
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        if let Self::Editing { draft, .. } = self {
            draft.set_description(description);
        }
    }

    /// Picks a status from the live list; unknown names are ignored
    pub fn select_status(&mut self, status: &str) -> bool {
        match self {
            Self::Editing { draft, statuses } if statuses.iter().any(|s| s == status) => {
                draft.set_status(status);
                true
            }
            _ => false,
        }
    }

    /// Writes the draft back through the store and returns to the board
    pub async fn update<S: Storage>(&self, store: &mut TaskStore<S>) -> Result<Route> {
        if let Self::Editing { draft, .. } = self {
            store.update_task(draft.clone()).await?;
        }
        Ok(Route::Board)
    }

    /// Deletes the task through the store and returns to the board
    pub async fn delete<S: Storage>(&self, store: &mut TaskStore<S>) -> Result<Route> {
        if let Self::Editing { draft, .. } = self {
            store.delete_task(draft.id).await?;
        }
        Ok(Route::Board)
    }
}
