use crate::{
    domain::{BoardMeta, Task},
    error::Result,
};
use async_trait::async_trait;

pub mod file_storage;
pub mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Key holding the JSON task array
pub const TASKS_KEY: &str = "tasks";

/// Key holding the board metadata (statuses and id counter)
pub const BOARD_KEY: &str = "board";

/// Storage trait for persisting the task list and board state
///
/// Loads return `Ok(None)` when nothing has been stored under the key yet and
/// a serialization error when the stored text cannot be parsed.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Loads the full task list
    async fn load_tasks(&self) -> Result<Option<Vec<Task>>>;

    /// Overwrites the full task list
    async fn save_tasks(&self, tasks: &[Task]) -> Result<()>;

    /// Loads the board metadata
    async fn load_board(&self) -> Result<Option<BoardMeta>>;

    /// Overwrites the board metadata
    async fn save_board(&self, meta: &BoardMeta) -> Result<()>;

    /// Checks if the storage holds a board
    async fn is_initialized(&self) -> bool;
}
