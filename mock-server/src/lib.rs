use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub done: bool,
    pub created_at: String,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub text: String,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub done: bool,
}

/// Tasks live in a Vec so listings preserve insertion order.
pub type Db = Arc<RwLock<Vec<Task>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/todos", get(list_tasks).post(create_task))
        .route("/api/todos/{id}", patch(update_task).delete(delete_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    let tasks = db.read().await;
    debug!(count = tasks.len(), "list tasks");
    Json(tasks.clone())
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<CreateTask>,
) -> (StatusCode, Json<Task>) {
    let task = Task {
        id: Uuid::new_v4(),
        text: input.text,
        done: false,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    db.write().await.push(task.clone());
    debug!(id = %task.id, "created task");
    (StatusCode::CREATED, Json(task))
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, StatusCode> {
    let mut tasks = db.write().await;
    let task = tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    task.done = input.done;
    debug!(id = %id, done = input.done, "updated task");
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut tasks = db.write().await;
    let before = tasks.len();
    tasks.retain(|task| task.id != id);
    if tasks.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    debug!(id = %id, "deleted task");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_to_json() {
        let task = Task {
            id: Uuid::nil(),
            text: "Test".to_string(),
            done: false,
            created_at: "2024-05-01T10:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["text"], "Test");
        assert_eq!(json["done"], false);
        assert_eq!(json["created_at"], "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn task_roundtrips_through_json() {
        let task = Task {
            id: Uuid::new_v4(),
            text: "Roundtrip".to_string(),
            done: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, task.id);
        assert_eq!(back.text, task.text);
        assert_eq!(back.done, task.done);
        assert_eq!(back.created_at, task.created_at);
    }

    #[test]
    fn create_task_rejects_missing_text() {
        let result: Result<CreateTask, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_task_accepts_text_only() {
        let input: CreateTask = serde_json::from_str(r#"{"text":"Walk dog"}"#).unwrap();
        assert_eq!(input.text, "Walk dog");
    }

    #[test]
    fn update_task_requires_done() {
        let result: Result<UpdateTask, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());

        let input: UpdateTask = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert!(input.done);
    }
}
