use crate::domain::status::{StatusList, DEFAULT_STATUSES};
use crate::domain::task::{Task, TaskId};
use crate::error::{BoardError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Board-level state persisted next to the task list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMeta {
    pub statuses: StatusList,
    pub next_task_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Repairs applied while rebuilding a board from persisted data
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    /// Statuses referenced by tasks but missing from the status list
    pub appended_statuses: Vec<String>,
    /// Tasks that shared an id with an earlier task, as (old, new)
    pub reassigned_ids: Vec<(TaskId, TaskId)>,
    /// Tasks with a blank status, moved to the first column
    pub rehomed_tasks: Vec<TaskId>,
}

impl RestoreReport {
    pub fn is_clean(&self) -> bool {
        self.appended_statuses.is_empty()
            && self.reassigned_ids.is_empty()
            && self.rehomed_tasks.is_empty()
    }
}

/// Canonical board state: ordered statuses, ordered tasks and the id counter
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    statuses: StatusList,
    tasks: Vec<Task>,
    next_task_id: u64,
}

impl Board {
    pub fn new(statuses: StatusList) -> Self {
        Self {
            statuses,
            tasks: Vec::new(),
            next_task_id: 1,
        }
    }

    /// Rebuilds a board from persisted parts
    ///
    /// Every task status ends up in the status list and every id is unique;
    /// the counter is always past the largest id in use. Fails with
    /// `IdSpaceExhausted` when no id is left past the stored ones.
    pub fn restore(
        tasks: Vec<Task>,
        meta: Option<BoardMeta>,
        default_statuses: &StatusList,
    ) -> Result<(Self, RestoreReport)> {
        let mut report = RestoreReport::default();
        let (mut statuses, stored_next) = match meta {
            Some(meta) => (meta.statuses, meta.next_task_id),
            None => (default_statuses.clone(), 1),
        };

        let max_id = tasks.iter().map(|t| t.id.value()).max().unwrap_or(0);
        let mut next_task_id = stored_next.max(next_id_after(max_id)?);

        let mut seen = HashSet::new();
        let mut restored = Vec::with_capacity(tasks.len());
        for mut task in tasks {
            if !seen.insert(task.id) {
                let fresh = TaskId::new(next_task_id);
                next_task_id = next_id_after(next_task_id)?;
                report.reassigned_ids.push((task.id, fresh));
                task.id = fresh;
                seen.insert(fresh);
            }
            let trimmed = task.status.trim();
            if trimmed.is_empty() {
                let fallback = statuses
                    .iter()
                    .next()
                    .unwrap_or(DEFAULT_STATUSES[0])
                    .to_string();
                report.rehomed_tasks.push(task.id);
                task.status = fallback;
            } else if trimmed.len() != task.status.len() {
                task.status = trimmed.to_string();
            }
            if !statuses.contains(&task.status) && statuses.push(&task.status).is_ok() {
                report.appended_statuses.push(task.status.clone());
            }
            restored.push(task);
        }

        let board = Self {
            statuses,
            tasks: restored,
            next_task_id,
        };
        Ok((board, report))
    }

    /// Snapshot of the board-level state for persistence
    pub fn meta(&self) -> BoardMeta {
        BoardMeta {
            statuses: self.statuses.clone(),
            next_task_id: self.next_task_id,
            updated_at: Some(Utc::now()),
        }
    }

    pub fn statuses(&self) -> &StatusList {
        &self.statuses
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn next_task_id(&self) -> TaskId {
        TaskId::new(self.next_task_id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in a column, in list order
    pub fn tasks_for_status<'a>(&'a self, status: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.is_in(status))
    }

    pub fn task_count_for_status(&self, status: &str) -> usize {
        self.tasks_for_status(status).count()
    }

    fn require_status(&self, status: &str) -> Result<()> {
        if self.statuses.contains(status) {
            Ok(())
        } else {
            Err(BoardError::StatusNotFound(status.to_string()))
        }
    }

    /// Appends a new task with an empty description to the given column
    pub fn add_task(&mut self, status: &str, title: &str) -> Result<TaskId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        self.require_status(status)?;

        let id = TaskId::new(self.next_task_id);
        self.next_task_id = next_id_after(self.next_task_id)?;
        self.tasks.push(Task::new(id, title, status));
        Ok(id)
    }

    /// Reassigns a task's status, returning the previous status when it changed
    pub fn move_task(&mut self, id: TaskId, status: &str) -> Result<Option<String>> {
        self.require_status(status)?;

        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) if task.status != status => {
                let previous = std::mem::replace(&mut task.status, status.to_string());
                Ok(Some(previous))
            }
            _ => Ok(None),
        }
    }

    /// Replaces a task wholesale, returning the previous version
    pub fn update_task(&mut self, mut task: Task) -> Result<Task> {
        let title = task.title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        if title.len() != task.title.len() {
            task.title = title.to_string();
        }
        self.require_status(&task.status)?;

        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| BoardError::TaskNotFound(task.id.to_string()))?;
        Ok(std::mem::replace(slot, task))
    }

    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn add_status(&mut self, name: &str) -> Result<String> {
        self.statuses.push(name).map(str::to_string)
    }

    /// Removes a status and every task in it
    ///
    /// Returns the removed tasks, or `None` when the status did not exist.
    pub fn delete_status(&mut self, name: &str) -> Option<Vec<Task>> {
        if !self.statuses.remove(name) {
            return None;
        }
        let (removed, kept): (Vec<Task>, Vec<Task>) =
            std::mem::take(&mut self.tasks).into_iter().partition(|t| t.is_in(name));
        self.tasks = kept;
        Some(removed)
    }
}

fn next_id_after(id: u64) -> Result<u64> {
    id.checked_add(1).ok_or(BoardError::IdSpaceExhausted)
}

impl Default for Board {
    fn default() -> Self {
        Self::new(StatusList::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_ids(board: &Board) -> Vec<u64> {
        board.tasks().iter().map(|t| t.id.value()).collect()
    }

    fn sample_board() -> Board {
        let mut board = Board::default();
        board.add_task("To Do", "Task 1").unwrap();
        board.add_task("In Progress", "Task 2").unwrap();
        board.add_task("To Do", "Task 3").unwrap();
        board.add_task("Done", "Task 4").unwrap();
        board
    }

    #[test]
    fn test_board_creation() {
        let board = Board::default();
        assert_eq!(board.next_task_id(), TaskId::new(1));
        assert!(board.tasks().is_empty());
        assert_eq!(board.statuses().len(), 3);
    }

    #[test]
    fn test_add_task() {
        let mut board = Board::default();
        let id = board.add_task("To Do", "X").unwrap();

        let task = board.task(id).unwrap();
        assert_eq!(task.title, "X");
        assert_eq!(task.description, "");
        assert_eq!(task.status, "To Do");
    }

    #[test]
    fn test_add_task_rejects_blank_title() {
        let mut board = Board::default();
        assert!(matches!(board.add_task("To Do", "   "), Err(BoardError::EmptyTitle)));
        assert!(board.tasks().is_empty());
        assert_eq!(board.next_task_id(), TaskId::new(1));
    }

    #[test]
    fn test_add_task_rejects_unknown_status() {
        let mut board = Board::default();
        assert!(matches!(
            board.add_task("Backlog", "X"),
            Err(BoardError::StatusNotFound(_))
        ));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut board = sample_board();
        board.delete_task(TaskId::new(2)).unwrap();

        let id = board.add_task("To Do", "New").unwrap();
        assert_eq!(id, TaskId::new(5));
        assert!(board.tasks().iter().filter(|t| t.id == id).count() == 1);
    }

    #[test]
    fn test_move_task_changes_only_status() {
        let mut board = sample_board();
        let before = board.clone();

        let previous = board.move_task(TaskId::new(1), "Done").unwrap();
        assert_eq!(previous.as_deref(), Some("To Do"));

        for (old, new) in before.tasks().iter().zip(board.tasks()) {
            if old.id == TaskId::new(1) {
                assert_eq!(new.status, "Done");
                assert_eq!(new.title, old.title);
                assert_eq!(new.description, old.description);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_move_task_same_status_is_noop() {
        let mut board = sample_board();
        let before = board.clone();
        assert_eq!(board.move_task(TaskId::new(1), "To Do").unwrap(), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_missing_task_is_noop() {
        let mut board = sample_board();
        let before = board.clone();
        assert_eq!(board.move_task(TaskId::new(99), "Done").unwrap(), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_update_task_replaces_whole_record() {
        let mut board = sample_board();
        let mut edited = board.task(TaskId::new(2)).unwrap().clone();
        edited.title = "New".to_string();
        edited.description = "details".to_string();
        edited.status = "Done".to_string();

        let previous = board.update_task(edited.clone()).unwrap();
        assert_eq!(previous.title, "Task 2");
        assert_eq!(board.task(TaskId::new(2)), Some(&edited));
        assert_eq!(board.task(TaskId::new(1)).unwrap().title, "Task 1");
    }

    #[test]
    fn test_update_task_validates() {
        let mut board = sample_board();
        let before = board.clone();

        let mut blank = board.task(TaskId::new(1)).unwrap().clone();
        blank.title = " ".to_string();
        assert!(matches!(board.update_task(blank), Err(BoardError::EmptyTitle)));

        let mut orphan = board.task(TaskId::new(1)).unwrap().clone();
        orphan.status = "Somewhere".to_string();
        assert!(matches!(
            board.update_task(orphan),
            Err(BoardError::StatusNotFound(_))
        ));

        let missing = Task::new(TaskId::new(42), "Ghost", "To Do");
        assert!(matches!(
            board.update_task(missing),
            Err(BoardError::TaskNotFound(_))
        ));

        assert_eq!(board, before);
    }

    #[test]
    fn test_update_task_trims_title() {
        let mut board = sample_board();
        let mut edited = board.task(TaskId::new(1)).unwrap().clone();
        edited.title = "  Padded  ".to_string();

        board.update_task(edited).unwrap();
        assert_eq!(board.task(TaskId::new(1)).unwrap().title, "Padded");
    }

    #[test]
    fn test_restore_with_max_id_is_exhausted() {
        let tasks = vec![Task::new(TaskId::new(u64::MAX), "A", "To Do")];
        assert!(matches!(
            Board::restore(tasks, None, &StatusList::default()),
            Err(BoardError::IdSpaceExhausted)
        ));
    }

    #[test]
    fn test_restore_duplicate_at_counter_limit_is_exhausted() {
        let meta = BoardMeta {
            statuses: StatusList::default(),
            next_task_id: u64::MAX,
            updated_at: None,
        };
        let tasks = vec![
            Task::new(TaskId::new(1), "A", "To Do"),
            Task::new(TaskId::new(1), "B", "To Do"),
        ];
        assert!(matches!(
            Board::restore(tasks, Some(meta), &StatusList::default()),
            Err(BoardError::IdSpaceExhausted)
        ));
    }

    #[test]
    fn test_add_task_at_counter_limit_fails() {
        let meta = BoardMeta {
            statuses: StatusList::default(),
            next_task_id: u64::MAX,
            updated_at: None,
        };
        let (mut board, _) = Board::restore(Vec::new(), Some(meta), &StatusList::default()).unwrap();
        let before = board.clone();

        assert!(matches!(
            board.add_task("To Do", "X"),
            Err(BoardError::IdSpaceExhausted)
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn test_delete_task() {
        let mut board = sample_board();
        let removed = board.delete_task(TaskId::new(3)).unwrap();
        assert_eq!(removed.title, "Task 3");
        assert_eq!(task_ids(&board), vec![1, 2, 4]);

        assert!(board.delete_task(TaskId::new(3)).is_none());
        assert_eq!(task_ids(&board), vec![1, 2, 4]);
    }

    #[test]
    fn test_tasks_for_status_keeps_list_order() {
        let board = sample_board();
        let ids: Vec<u64> = board.tasks_for_status("To Do").map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(board.task_count_for_status("Done"), 1);
        assert_eq!(board.task_count_for_status("Nope"), 0);
    }

    #[test]
    fn test_columns_partition_tasks() {
        let board = sample_board();
        let total: usize = board
            .statuses()
            .iter()
            .map(|s| board.task_count_for_status(s))
            .sum();
        assert_eq!(total, board.tasks().len());
    }

    #[test]
    fn test_delete_status_cascades() {
        let mut board = sample_board();
        let untouched: Vec<Task> = board
            .tasks()
            .iter()
            .filter(|t| t.status != "To Do")
            .cloned()
            .collect();

        let removed = board.delete_status("To Do").unwrap();
        assert_eq!(removed.len(), 2);
        assert!(!board.statuses().contains("To Do"));
        assert_eq!(board.tasks(), untouched.as_slice());
    }

    #[test]
    fn test_delete_status_scenario() {
        let tasks = vec![
            Task::new(TaskId::new(1), "A", "To Do"),
            Task::new(TaskId::new(2), "B", "Done"),
        ];
        let (mut board, _) = Board::restore(tasks, None, &StatusList::default()).unwrap();

        board.delete_status("To Do").unwrap();
        assert_eq!(board.tasks(), &[Task::new(TaskId::new(2), "B", "Done")]);
        let names: Vec<&str> = board.statuses().iter().collect();
        assert_eq!(names, vec!["In Progress", "Done"]);
    }

    #[test]
    fn test_delete_missing_status_is_noop() {
        let mut board = sample_board();
        let before = board.clone();
        assert!(board.delete_status("Archive").is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_add_status() {
        let mut board = Board::default();
        assert_eq!(board.add_status(" Review ").unwrap(), "Review");
        assert!(matches!(
            board.add_status("Review"),
            Err(BoardError::DuplicateStatus(_))
        ));
        assert!(matches!(board.add_status(""), Err(BoardError::EmptyStatusName)));
        assert_eq!(board.statuses().len(), 4);
    }

    #[test]
    fn test_restore_appends_referenced_statuses() {
        let tasks = vec![
            Task::new(TaskId::new(1), "A", "Backlog"),
            Task::new(TaskId::new(2), "B", "Done"),
        ];
        let (board, report) = Board::restore(tasks, None, &StatusList::default()).unwrap();

        assert_eq!(report.appended_statuses, vec!["Backlog".to_string()]);
        assert_eq!(board.statuses().position("Backlog"), Some(3));
        assert_eq!(board.next_task_id(), TaskId::new(3));
    }

    #[test]
    fn test_restore_reassigns_duplicate_ids() {
        let tasks = vec![
            Task::new(TaskId::new(1), "A", "To Do"),
            Task::new(TaskId::new(2), "B", "To Do"),
            Task::new(TaskId::new(2), "C", "Done"),
        ];
        let (board, report) = Board::restore(tasks, None, &StatusList::default()).unwrap();

        assert_eq!(report.reassigned_ids, vec![(TaskId::new(2), TaskId::new(3))]);
        assert_eq!(task_ids(&board), vec![1, 2, 3]);
        assert_eq!(board.next_task_id(), TaskId::new(4));
    }

    #[test]
    fn test_restore_rehomes_blank_status() {
        let tasks = vec![Task::new(TaskId::new(1), "A", "  ")];
        let (board, report) = Board::restore(tasks, None, &StatusList::default()).unwrap();

        assert_eq!(report.rehomed_tasks, vec![TaskId::new(1)]);
        assert_eq!(board.task(TaskId::new(1)).unwrap().status, "To Do");
        assert_eq!(board.statuses().len(), 3);
    }

    #[test]
    fn test_restore_respects_stored_counter() {
        let meta = BoardMeta {
            statuses: StatusList::from_names(["Only"]),
            next_task_id: 10,
            updated_at: None,
        };
        let tasks = vec![Task::new(TaskId::new(3), "A", "Only")];
        let (board, report) = Board::restore(tasks, Some(meta), &StatusList::default()).unwrap();

        assert!(report.is_clean());
        assert_eq!(board.next_task_id(), TaskId::new(10));
        assert_eq!(board.statuses().len(), 1);
    }
}
