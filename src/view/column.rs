use crate::store::Command;
use crate::view::card::DragItem;

/// Drop target and quick-add input for one status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusColumn {
    status: String,
    new_task_title: String,
}

impl StatusColumn {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            new_task_title: String::new(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn header(&self, task_count: usize) -> String {
        format!("{} ({})", self.status, task_count)
    }

    pub fn accepts(&self, item: &DragItem) -> bool {
        matches!(item, DragItem::Task(_))
    }

    /// Moves a dropped task into this column, whatever its current status
    pub fn drop_item(&self, item: &DragItem) -> Option<Command> {
        match item {
            DragItem::Task(id) => Some(Command::MoveTask {
                id: *id,
                status: self.status.clone(),
            }),
            DragItem::Other(_) => None,
        }
    }

    pub fn input(&self) -> &str {
        &self.new_task_title
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.new_task_title = text.into();
    }

    /// Turns the input into an add-task command and clears it
    ///
    /// Blank input is ignored and left in place.
    pub fn submit_new_task(&mut self) -> Option<Command> {
        let title = self.new_task_title.trim();
        if title.is_empty() {
            return None;
        }
        let command = Command::AddTask {
            status: self.status.clone(),
            title: title.to_string(),
        };
        self.new_task_title.clear();
        Some(command)
    }
}
