use crate::domain::{Task, TaskId};
use crate::error::{BoardError, Result};
use crate::storage::Storage;
use crate::store::{Command, TaskStore};
use crate::view::{
    card::{DragItem, TaskCard},
    column::StatusColumn,
    detail::TaskDetailView,
    route::Route,
};
use tracing::debug;

/// One rendered column: its status, header and cards in list order
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView<'a> {
    pub status: &'a str,
    pub header: String,
    pub tasks: Vec<&'a Task>,
}

/// Add-status dialog state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddStatusDialog {
    pub input: String,
}

/// Pending delete-status confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteStatusPrompt {
    pub status: String,
    pub task_count: usize,
}

impl DeleteStatusPrompt {
    pub fn message(&self) -> String {
        match self.task_count {
            0 => format!("Delete status '{}'?", self.status),
            n => format!(
                "Delete status '{}' and its {} task(s)? This cannot be undone.",
                self.status, n
            ),
        }
    }
}

/// The board: owns the store and hosts one column per status
pub struct BoardView<S: Storage> {
    store: TaskStore<S>,
    columns: Vec<StatusColumn>,
    add_status: Option<AddStatusDialog>,
    delete_prompt: Option<DeleteStatusPrompt>,
    route: Route,
}

impl<S: Storage> BoardView<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        let mut view = Self {
            store,
            columns: Vec::new(),
            add_status: None,
            delete_prompt: None,
            route: Route::Board,
        };
        view.sync_columns();
        view
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore<S> {
        &mut self.store
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Rebuilds columns from the status list, keeping typed input
    fn sync_columns(&mut self) {
        let mut previous = std::mem::take(&mut self.columns);
        self.columns = self
            .store
            .board()
            .statuses()
            .iter()
            .map(|status| match previous.iter().position(|c| c.status() == status) {
                Some(index) => previous.swap_remove(index),
                None => StatusColumn::new(status),
            })
            .collect();
    }

    async fn apply(&mut self, command: Command) -> Result<()> {
        self.store.dispatch(command).await?;
        self.sync_columns();
        Ok(())
    }

    pub fn columns(&self) -> Vec<ColumnView<'_>> {
        let board = self.store.board();
        self.columns
            .iter()
            .map(|column| {
                let tasks: Vec<&Task> = board.tasks_for_status(column.status()).collect();
                ColumnView {
                    status: column.status(),
                    header: column.header(tasks.len()),
                    tasks,
                }
            })
            .collect()
    }

    pub fn column(&self, status: &str) -> Option<&StatusColumn> {
        self.columns.iter().find(|c| c.status() == status)
    }

    pub fn column_mut(&mut self, status: &str) -> Option<&mut StatusColumn> {
        self.columns.iter_mut().find(|c| c.status() == status)
    }

    fn require_column(&mut self, status: &str) -> Result<&mut StatusColumn> {
        self.columns
            .iter_mut()
            .find(|c| c.status() == status)
            .ok_or_else(|| BoardError::StatusNotFound(status.to_string()))
    }

    pub fn card(&self, id: TaskId) -> Option<TaskCard> {
        self.store.task(id).map(TaskCard::new)
    }

    /// Handles a drop on a column; returns whether a move was dispatched
    pub async fn drop_on_column(&mut self, status: &str, item: &DragItem) -> Result<bool> {
        let command = self.require_column(status)?.drop_item(item);
        match command {
            Some(command) => {
                self.apply(command).await?;
                Ok(true)
            }
            None => {
                debug!(status, ?item, "drop rejected");
                Ok(false)
            }
        }
    }

    /// Submits a column's quick-add input
    pub async fn submit_new_task(&mut self, status: &str) -> Result<Option<TaskId>> {
        let Some(command) = self.require_column(status)?.submit_new_task() else {
            return Ok(None);
        };
        self.apply(command).await?;
        Ok(self.store.tasks().last().map(|t| t.id))
    }

    pub fn add_status_dialog(&self) -> Option<&AddStatusDialog> {
        self.add_status.as_ref()
    }

    pub fn open_add_status(&mut self) {
        self.add_status = Some(AddStatusDialog::default());
    }

    pub fn set_add_status_input(&mut self, text: impl Into<String>) {
        if let Some(dialog) = self.add_status.as_mut() {
            dialog.input = text.into();
        }
    }

    pub fn cancel_add_status(&mut self) {
        self.add_status = None;
    }

    /// Adds the entered status; the dialog closes only on success
    pub async fn submit_add_status(&mut self) -> Result<String> {
        let input = match &self.add_status {
            Some(dialog) => dialog.input.clone(),
            None => return Err(BoardError::Other("Add status dialog is not open".to_string())),
        };
        let name = self.store.add_status(&input).await?;
        self.sync_columns();
        self.add_status = None;
        Ok(name)
    }

    pub fn delete_prompt(&self) -> Option<&DeleteStatusPrompt> {
        self.delete_prompt.as_ref()
    }

    /// Opens the confirmation prompt for deleting a status
    pub fn request_delete_status(&mut self, status: &str) -> Result<&DeleteStatusPrompt> {
        if !self.store.board().statuses().contains(status) {
            return Err(BoardError::StatusNotFound(status.to_string()));
        }
        let prompt = DeleteStatusPrompt {
            status: status.to_string(),
            task_count: self.store.board().task_count_for_status(status),
        };
        Ok(self.delete_prompt.insert(prompt))
    }

    pub fn dismiss_delete_status(&mut self) {
        self.delete_prompt = None;
    }

    /// Performs the cascading delete for the pending prompt
    pub async fn confirm_delete_status(&mut self) -> Result<Option<String>> {
        let Some(prompt) = self.delete_prompt.take() else {
            return Ok(None);
        };
        self.apply(Command::DeleteStatus(prompt.status.clone())).await?;
        Ok(Some(prompt.status))
    }

    /// Opens a card's detail view, following the card's click rules
    pub fn open_card(&mut self, card: &TaskCard) -> Option<TaskDetailView> {
        let route = card.click()?;
        self.navigate(route)
    }

    /// Switches views; returns the detail editor for detail routes
    pub fn navigate(&mut self, route: Route) -> Option<TaskDetailView> {
        self.route = route;
        match route {
            Route::Board => {
                self.sync_columns();
                None
            }
            Route::TaskDetail(id) => Some(TaskDetailView::open(&self.store, &id.to_string())),
        }
    }

    /// Opens a path such as `/task/2`
    ///
    /// A path that does not parse renders as not found and leaves the current
    /// route unchanged, since no route can address it.
    pub fn open_path(&mut self, path: &str) -> Option<TaskDetailView> {
        match path.parse::<Route>() {
            Ok(route) => self.navigate(route),
            Err(_) => {
                let id = path.trim().trim_start_matches("/task/");
                Some(TaskDetailView::open(&self.store, id))
            }
        }
    }
}
