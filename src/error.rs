use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Status not found: {0}")]
    StatusNotFound(String),

    #[error("Invalid task ID format: {0}")]
    InvalidTaskId(String),

    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Status name must not be empty")]
    EmptyStatusName,

    #[error("Status already exists: {0}")]
    DuplicateStatus(String),

    #[error("No task IDs left to assign")]
    IdSpaceExhausted,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),
}

impl From<toml::de::Error> for BoardError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}
