use crate::domain::TaskId;
use crate::error::BoardError;
use std::{fmt, str::FromStr};

/// Addressable views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Board,
    TaskDetail(TaskId),
}

impl Route {
    const TASK_PREFIX: &'static str = "/task/";
}

impl FromStr for Route {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        if path.is_empty() || path == "/" {
            return Ok(Self::Board);
        }
        match path.strip_prefix(Self::TASK_PREFIX) {
            Some(id) => Ok(Self::TaskDetail(id.trim_end_matches('/').parse()?)),
            None => Err(BoardError::Other(format!("Unknown route: {s}"))),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board => write!(f, "/"),
            Self::TaskDetail(id) => write!(f, "{}{}", Self::TASK_PREFIX, id),
        }
    }
}
