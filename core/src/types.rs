//! Domain DTOs for the task-list API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently;
//! integration tests catch any drift between the two crates. `id` and
//! `created_at` are server-assigned and treated as opaque strings on this
//! side of the contract, so the core carries no id or timestamp crates.

use serde::{Deserialize, Serialize};

/// A single task returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub done: bool,
    pub created_at: String,
}

/// Request payload for creating a new task. The server assigns `id` and
/// `created_at` and stores the task as not done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub text: String,
}

/// Request payload for toggling a task. `done` is the only mutable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub done: bool,
}
