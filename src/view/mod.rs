//! Headless view models for the board, its columns and cards, and the task
//! detail editor. Rendering is left to the embedding front end.

pub mod board;
pub mod card;
pub mod column;
pub mod detail;
pub mod route;

pub use board::{AddStatusDialog, BoardView, ColumnView, DeleteStatusPrompt};
pub use card::{DragItem, TaskCard};
pub use column::StatusColumn;
pub use detail::TaskDetailView;
pub use route::Route;
