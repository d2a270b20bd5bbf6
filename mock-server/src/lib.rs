use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "todoid")]
    pub id: Uuid,
    pub description: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct TodoInput {
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Insertion-ordered so `GET /todos` lists rows in creation order.
pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/create", post(create_todo))
        .route("/todos/{todoid}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> (StatusCode, Json<Todo>) {
    let todo = Todo {
        id: Uuid::new_v4(),
        description: input.description,
        completed: input.completed,
    };
    info!("created {}", todo.id);
    db.write().await.push(todo.clone());
    (StatusCode::CREATED, Json(todo))
}

/// Ids that are not UUIDs cannot name a stored row, so they are reported the
/// same way as unknown ones.
fn parse_id(raw: &str) -> Result<Uuid, StatusCode> {
    Uuid::parse_str(raw).map_err(|_| StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(raw_id): Path<String>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, StatusCode> {
    let id = parse_id(&raw_id)?;
    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|todo| todo.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    todo.description = input.description;
    todo.completed = input.completed;
    info!("updated {id}");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id = parse_id(&raw_id)?;
    let mut todos = db.write().await;
    let index = todos
        .iter()
        .position(|todo| todo.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    todos.remove(index);
    info!("deleted {id}");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_todoid() {
        let todo = Todo {
            id: Uuid::nil(),
            description: "Test".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["todoid"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["description"], "Test");
        assert_eq!(json["completed"], false);
        assert!(json.get("id").is_none());
    }

    #[test]
    fn input_defaults_completed_to_false() {
        let input: TodoInput = serde_json::from_str(r#"{"description":"No completed field"}"#).unwrap();
        assert_eq!(input.description, "No completed field");
        assert!(!input.completed);
    }

    #[test]
    fn non_uuid_ids_are_not_found() {
        assert_eq!(parse_id("not-a-uuid"), Err(StatusCode::NOT_FOUND));
        assert_eq!(parse_id("00000000-0000-0000-0000-000000000000"), Ok(Uuid::nil()));
    }

    #[test]
    fn input_rejects_missing_description() {
        let result: Result<TodoInput, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }
}
