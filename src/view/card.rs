use crate::domain::{Task, TaskId};
use crate::view::route::Route;

/// Payload carried by a drag gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    Task(TaskId),
    /// Anything dragged in from outside the board
    Other(String),
}

/// Draggable card for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    id: TaskId,
    title: String,
    dragging: bool,
}

impl TaskCard {
    const DRAG_OPACITY: f32 = 0.5;

    pub fn new(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            dragging: false,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_drag(&mut self) -> DragItem {
        self.dragging = true;
        DragItem::Task(self.id)
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn opacity(&self) -> f32 {
        if self.dragging {
            Self::DRAG_OPACITY
        } else {
            1.0
        }
    }

    /// Navigates to the task's detail view unless a drag is in progress
    pub fn click(&self) -> Option<Route> {
        (!self.dragging).then_some(Route::TaskDetail(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> TaskCard {
        TaskCard::new(&Task::new(TaskId::new(4), "Card", "To Do"))
    }

    #[test]
    fn test_click_navigates_to_detail() {
        let card = card();
        assert_eq!(card.title(), "Card");
        assert_eq!(card.click(), Some(Route::TaskDetail(TaskId::new(4))));
    }

    #[test]
    fn test_drag_dims_card_and_blocks_click() {
        let mut card = card();
        assert_eq!(card.opacity(), 1.0);

        assert_eq!(card.begin_drag(), DragItem::Task(TaskId::new(4)));
        assert!(card.is_dragging());
        assert_eq!(card.opacity(), 0.5);
        assert_eq!(card.click(), None);

        card.end_drag();
        assert_eq!(card.opacity(), 1.0);
        assert!(card.click().is_some());
    }
}
