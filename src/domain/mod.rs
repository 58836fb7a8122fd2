pub mod board;
pub mod status;
pub mod task;

pub use board::{Board, BoardMeta, RestoreReport};
pub use status::{StatusList, DEFAULT_STATUSES};
pub use task::{Task, TaskId};
