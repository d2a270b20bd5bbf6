//! Plain-text rendering of controller state.

use todolist_core::{Notification, NotificationKind, RowMode, TodoController};

pub fn list(controller: &TodoController) -> String {
    if controller.is_empty() {
        return "  No todos yet.\n".to_string();
    }
    let mut out = String::new();
    for (i, row) in controller.rows().iter().enumerate() {
        let mark = if row.todo.completed { 'x' } else { ' ' };
        let line = match row.mode {
            RowMode::Viewing => format!("{:>3}. [{mark}] {}", i + 1, row.todo.description),
            RowMode::Editing { draft } => format!("{:>3}. [{mark}] editing: {draft:?}", i + 1),
        };
        out.push_str(&line);
        if row.busy {
            out.push_str("  (saving)");
        }
        out.push('\n');
    }
    out
}

pub fn notification(note: &Notification) -> String {
    let symbol = match note.kind {
        NotificationKind::Success => '✓',
        NotificationKind::Error => '✗',
    };
    format!("{symbol} {}", note.message)
}
