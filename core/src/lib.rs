//! Client-side synchronization core for a personal task-list service.
//!
//! # Overview
//! Implements the client half of a task-list resource — request building,
//! response parsing, the canonical list cache, and the completion-transition
//! state the view renders — without touching the network (host-does-IO
//! pattern). Operations produce `Effect` values; the host executes each HTTP
//! round-trip however it likes and feeds the result back, making the core
//! fully deterministic and testable.
//!
//! # Design
//! - `TaskClient` is stateless — it holds only `base_url`. Each operation is
//!   split into `build_*` (produces request) and `parse_*` (consumes
//!   response), so the I/O boundary is explicit.
//! - `TaskStore` owns the canonical list and never patches it locally: a
//!   successful mutation invalidates the cache and refetches.
//! - `ExitTransitions` and `TimerRegistry` keep the fade-out animation state
//!   as data, with time passed in by the host event loop.
//! - Types use owned `String` / `Vec` fields; `id` and `created_at` are
//!   opaque server-assigned strings.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod cache;
pub mod client;
pub mod error;
pub mod http;
pub mod store;
pub mod timer;
pub mod types;
pub mod view;

pub use cache::{ListCache, Subscriber, SubscriberId};
pub use client::TaskClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{Applied, Effect, RequestToken, StoreEvent, TaskStore};
pub use timer::TimerRegistry;
pub use types::{CreateTask, Task, UpdateTask};
pub use view::{ExitPreview, ExitTransitions, EXIT_ANIMATION};
