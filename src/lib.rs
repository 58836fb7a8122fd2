//! # Taskboard Core
//!
//! State management, persistence and headless view models for a single-user
//! kanban task board.
//!
//! All mutations go through one [`TaskStore`], which mirrors the full task list
//! and board metadata to a [`Storage`] backend after every change and notifies
//! subscribers. Views in [`view`] turn user gestures into store commands.

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod storage;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use config::BoardConfig;
pub use domain::{Board, BoardMeta, StatusList, Task, TaskId};
pub use error::{BoardError, Result};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{Command, StoreEvent, TaskStore};
pub use view::{BoardView, Route, StatusColumn, TaskCard, TaskDetailView};
