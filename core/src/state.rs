//! Client view state and the row projection rendered from it.

use crate::types::{Todo, TodoId};

/// Everything the list view is rendered from. Owned by `TodoController`;
/// hosts only ever see it by shared reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Server order, replaced wholesale by every applied refresh.
    pub todos: Vec<Todo>,
    pub draft_description: String,
    pub editing_id: Option<TodoId>,
    pub draft_edit_text: String,
    /// Completion state a toggle asked for, scoped to the toggled row. Set
    /// when the toggle is issued; cleared when its request settles or is
    /// cancelled, and by any applied refresh.
    pub pending_completed: Option<(TodoId, bool)>,
}

impl ViewState {
    pub fn find(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// Completion state to send in an update of `todo`.
    pub fn completed_for(&self, todo: &Todo) -> bool {
        match &self.pending_completed {
            Some((id, completed)) if *id == todo.id => *completed,
            _ => todo.completed,
        }
    }

    pub fn is_editing(&self, id: &TodoId) -> bool {
        self.editing_id.as_ref() == Some(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode<'a> {
    Viewing,
    Editing { draft: &'a str },
}

/// One rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowView<'a> {
    pub todo: &'a Todo,
    pub mode: RowMode<'a>,
    /// A request for this row is in flight; its controls should be disabled.
    pub busy: bool,
}

impl RowView<'_> {
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, RowMode::Editing { .. })
    }
}
