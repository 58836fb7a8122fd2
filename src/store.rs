//! Single-writer task store
//!
//! [`TaskStore`] owns the canonical [`Board`] and the storage backend. Every
//! mutation goes through it, is mirrored to storage before the call returns,
//! and is announced to subscribers as a [`StoreEvent`].

use crate::{
    config::BoardConfig,
    domain::{Board, BoardMeta, Task, TaskId},
    error::{BoardError, Result},
    storage::{FileStorage, Storage},
};
use std::path::Path;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 64;

/// A state change requested by a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTask { status: String, title: String },
    MoveTask { id: TaskId, status: String },
    UpdateTask(Task),
    DeleteTask(TaskId),
    AddStatus(String),
    DeleteStatus(String),
}

/// Notification of a state change that was applied and persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TaskAdded(TaskId),
    TaskMoved { id: TaskId, from: String, to: String },
    TaskUpdated(TaskId),
    TaskDeleted(TaskId),
    StatusAdded(String),
    StatusDeleted { name: String, removed: Vec<TaskId> },
}

pub struct TaskStore<S: Storage> {
    board: Board,
    storage: S,
    events: broadcast::Sender<StoreEvent>,
}

impl<S: Storage> TaskStore<S> {
    /// Loads the board from storage
    ///
    /// Missing or unreadable persisted data falls back to an empty task list
    /// and the configured default statuses. Only I/O failures are returned.
    pub async fn load(storage: S, config: &BoardConfig) -> Result<Self> {
        if !storage.is_initialized().await {
            debug!("no stored board yet");
        }
        storage.initialize().await?;

        let tasks = match storage.load_tasks().await {
            Ok(tasks) => tasks.unwrap_or_default(),
            Err(BoardError::SerializationError(err)) => {
                warn!(error = %err, "persisted task list is unreadable, starting empty");
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        let meta = match storage.load_board().await {
            Ok(meta) => meta,
            Err(BoardError::SerializationError(err)) => {
                warn!(error = %err, "persisted board state is unreadable, using defaults");
                None
            }
            Err(err) => return Err(err),
        };

        let defaults = config.status_list();
        let (board, report) = match Board::restore(tasks, meta, &defaults) {
            Ok(restored) => restored,
            Err(BoardError::IdSpaceExhausted) => {
                warn!("persisted task ids exhaust the id space, starting empty");
                Board::restore(Vec::new(), None, &defaults)?
            }
            Err(err) => return Err(err),
        };
        if !report.is_clean() {
            warn!(
                appended_statuses = ?report.appended_statuses,
                reassigned_ids = ?report.reassigned_ids,
                rehomed_tasks = ?report.rehomed_tasks,
                "repaired persisted board"
            );
        }
        info!(
            board = %config.name,
            tasks = board.tasks().len(),
            statuses = board.statuses().len(),
            "loaded board"
        );

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            board,
            storage,
            events,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn tasks(&self) -> &[Task] {
        self.board.tasks()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.board.task(id)
    }

    /// Receives every event emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Writes the full task list and board metadata
    pub async fn persist(&self) -> Result<()> {
        write_board(&self.storage, &self.board, &self.board).await
    }

    /// Persists `next` and only then makes it the current board
    async fn commit(&mut self, next: Board, event: StoreEvent) -> Result<()> {
        write_board(&self.storage, &next, &self.board).await?;
        self.board = next;
        debug!(?event, "committed");
        // No receivers is fine
        let _ = self.events.send(event);
        Ok(())
    }

    pub async fn add_task(&mut self, status: &str, title: &str) -> Result<TaskId> {
        let mut next = self.board.clone();
        let id = next.add_task(status, title)?;
        self.commit(next, StoreEvent::TaskAdded(id)).await?;
        Ok(id)
    }

    /// Moves a task to another column; returns false when nothing changed
    pub async fn move_task(&mut self, id: TaskId, status: &str) -> Result<bool> {
        let mut next = self.board.clone();
        match next.move_task(id, status)? {
            Some(from) => {
                let event = StoreEvent::TaskMoved {
                    id,
                    from,
                    to: status.to_string(),
                };
                self.commit(next, event).await?;
                Ok(true)
            }
            None => {
                debug!(%id, status, "move skipped");
                Ok(false)
            }
        }
    }

    pub async fn update_task(&mut self, task: Task) -> Result<()> {
        let id = task.id;
        let mut next = self.board.clone();
        next.update_task(task)?;
        self.commit(next, StoreEvent::TaskUpdated(id)).await
    }

    /// Deletes a task; returns false when no task had the id
    pub async fn delete_task(&mut self, id: TaskId) -> Result<bool> {
        let mut next = self.board.clone();
        if next.delete_task(id).is_none() {
            return Ok(false);
        }
        self.commit(next, StoreEvent::TaskDeleted(id)).await?;
        Ok(true)
    }

    pub async fn add_status(&mut self, name: &str) -> Result<String> {
        let mut next = self.board.clone();
        let name = next.add_status(name)?;
        self.commit(next, StoreEvent::StatusAdded(name.clone())).await?;
        Ok(name)
    }

    /// Deletes a status and its tasks; returns the removed task ids
    pub async fn delete_status(&mut self, name: &str) -> Result<Option<Vec<TaskId>>> {
        let mut next = self.board.clone();
        let Some(removed) = next.delete_status(name) else {
            return Ok(None);
        };
        let removed: Vec<TaskId> = removed.iter().map(|t| t.id).collect();
        let event = StoreEvent::StatusDeleted {
            name: name.to_string(),
            removed: removed.clone(),
        };
        self.commit(next, event).await?;
        Ok(Some(removed))
    }

    /// Applies a command from a view
    pub async fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::AddTask { status, title } => {
                self.add_task(&status, &title).await?;
            }
            Command::MoveTask { id, status } => {
                self.move_task(id, &status).await?;
            }
            Command::UpdateTask(task) => self.update_task(task).await?,
            Command::DeleteTask(id) => {
                self.delete_task(id).await?;
            }
            Command::AddStatus(name) => {
                self.add_status(&name).await?;
            }
            Command::DeleteStatus(name) => {
                self.delete_status(&name).await?;
            }
        }
        Ok(())
    }
}

impl TaskStore<FileStorage> {
    /// Opens the board under a project root, reading its `config.toml`
    pub async fn open(project_root: impl AsRef<Path>) -> Result<Self> {
        let storage = FileStorage::new(project_root);
        storage.initialize().await?;
        let config = storage.load_config().await?;
        Self::load(storage, &config).await
    }
}

/// Writes board metadata, then tasks
///
/// If the task write fails, `previous` metadata is written back so storage
/// keeps describing the last committed board.
async fn write_board<S: Storage>(storage: &S, next: &Board, previous: &Board) -> Result<()> {
    let meta: BoardMeta = next.meta();
    storage.save_board(&meta).await?;
    if let Err(err) = storage.save_tasks(next.tasks()).await {
        if let Err(rollback) = storage.save_board(&previous.meta()).await {
            warn!(error = %rollback, "failed to restore board metadata after a failed write");
        }
        return Err(err);
    }
    Ok(())
}
