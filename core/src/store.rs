//! The synchronization store mediating between the view and the remote list.
//!
//! # Design
//! Sans-IO: every operation returns `Effect` values (requests tagged with a
//! token) and the host feeds each completed round-trip back through
//! `handle_response`. The store owns the canonical list cache and follows
//! one rule for writes: a successful mutation invalidates the cache and
//! issues a refetch. Cached data is never patched locally, so stale or late
//! responses are harmless — the next refetch replaces the snapshot
//! wholesale.
//!
//! Responses whose token is unknown are ignored; a round-trip that resolves
//! after its context is gone simply drops on the floor.

use std::collections::HashMap;

use crate::cache::{ListCache, Subscriber, SubscriberId};
use crate::client::TaskClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTask, Task, UpdateTask};

/// Identifies an in-flight request across the host round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// A request the host must execute, paired with the token to hand back.
#[derive(Debug)]
pub struct Effect {
    pub token: RequestToken,
    pub request: HttpRequest,
}

/// Notifications emitted as responses are applied.
#[derive(Debug)]
pub enum StoreEvent {
    /// The initial load resolved and the cache holds the list.
    ListLoaded,
    /// The initial load failed; `is_error` now reports true.
    LoadFailed(ApiError),
    /// A refetch resolved and the cache holds the fresh list.
    ListRefreshed,
    /// A refetch failed; the previous snapshot is retained.
    RefreshFailed(ApiError),
    /// A create resolved. The view may reset its input field.
    TaskCreated(Task),
    CreateFailed(ApiError),
    /// An update resolved with the task as stored by the server.
    TaskUpdated(Task),
    /// An update failed. The view should revert any optimistic exit state
    /// for this id.
    UpdateFailed { id: String, error: ApiError },
    TaskDeleted { id: String },
    DeleteFailed { id: String, error: ApiError },
    /// Every delete in the clear-completed batch succeeded.
    CompletedCleared,
    /// At least one delete in the batch failed; carries the first error.
    ClearCompletedFailed(ApiError),
}

/// Result of applying one response: an optional notification for the view
/// and an optional follow-up request (the refetch) for the host to execute.
#[derive(Debug)]
pub struct Applied {
    pub event: Option<StoreEvent>,
    pub follow_up: Option<Effect>,
}

impl Applied {
    fn nothing() -> Self {
        Self {
            event: None,
            follow_up: None,
        }
    }

    fn event(event: StoreEvent) -> Self {
        Self {
            event: Some(event),
            follow_up: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    NotStarted,
    Pending,
    Loaded,
    Failed,
}

enum InFlight {
    Load,
    Refetch,
    Create,
    Update { id: String },
    Delete { id: String },
    ClearDelete,
}

struct ClearBatch {
    remaining: usize,
    first_error: Option<ApiError>,
}

/// Client-side synchronization state for the task list.
pub struct TaskStore {
    client: TaskClient,
    cache: ListCache,
    load: LoadState,
    next_token: u64,
    in_flight: HashMap<RequestToken, InFlight>,
    clear_batch: Option<ClearBatch>,
    create_in_flight: usize,
    update_in_flight: usize,
    delete_in_flight: usize,
}

impl TaskStore {
    pub fn new(client: TaskClient) -> Self {
        Self {
            client,
            cache: ListCache::new(),
            load: LoadState::NotStarted,
            next_token: 0,
            in_flight: HashMap::new(),
            clear_batch: None,
            create_in_flight: 0,
            update_in_flight: 0,
            delete_in_flight: 0,
        }
    }

    /// Current canonical list; empty before the initial load resolves.
    pub fn tasks(&self) -> &[Task] {
        self.cache.get()
    }

    /// True only while the initial load is outstanding.
    pub fn is_pending(&self) -> bool {
        self.load == LoadState::Pending
    }

    /// True only if the initial load failed.
    pub fn is_error(&self) -> bool {
        self.load == LoadState::Failed
    }

    pub fn create_pending(&self) -> bool {
        self.create_in_flight > 0
    }

    pub fn update_pending(&self) -> bool {
        self.update_in_flight > 0
    }

    pub fn delete_pending(&self) -> bool {
        self.delete_in_flight > 0
    }

    pub fn clear_pending(&self) -> bool {
        self.clear_batch.is_some()
    }

    /// Register a callback run on every snapshot change.
    pub fn subscribe(&mut self, subscriber: Subscriber) -> SubscriberId {
        self.cache.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.cache.unsubscribe(id)
    }

    /// Fetch the list. The first call is the initial load that `is_pending`
    /// and `is_error` report on; once a load has succeeded, later calls
    /// behave as refetches of the cached snapshot. There is no retry policy
    /// beyond calling this again.
    pub fn load(&mut self) -> Effect {
        let op = match self.load {
            LoadState::Loaded => InFlight::Refetch,
            _ => {
                self.load = LoadState::Pending;
                InFlight::Load
            }
        };
        let request = self.client.build_list_tasks();
        self.track(op, request)
    }

    /// Create a task from `text`, trimmed. Whitespace-only input never
    /// produces a request; `Ok(None)` is returned instead.
    pub fn create(&mut self, text: &str) -> Result<Option<Effect>, ApiError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let input = CreateTask {
            text: trimmed.to_string(),
        };
        let request = self.client.build_create_task(&input)?;
        self.create_in_flight += 1;
        Ok(Some(self.track(InFlight::Create, request)))
    }

    /// Send the new `done` value for a task.
    pub fn update(&mut self, id: &str, done: bool) -> Result<Effect, ApiError> {
        let request = self.client.build_update_task(id, &UpdateTask { done })?;
        self.update_in_flight += 1;
        Ok(self.track(
            InFlight::Update { id: id.to_string() },
            request,
        ))
    }

    /// Remove a single task by id.
    pub fn delete(&mut self, id: &str) -> Effect {
        let request = self.client.build_delete_task(id);
        self.delete_in_flight += 1;
        self.track(InFlight::Delete { id: id.to_string() }, request)
    }

    /// Delete every task in `ids` as one batch. All effects are returned up
    /// front so the host can execute them concurrently; the store joins on
    /// the full set of responses before reporting. While a batch is
    /// outstanding, or when `ids` is empty, no batch starts and an empty
    /// vec is returned.
    pub fn clear_completed(&mut self, ids: &[String]) -> Vec<Effect> {
        if ids.is_empty() || self.clear_batch.is_some() {
            return Vec::new();
        }
        self.clear_batch = Some(ClearBatch {
            remaining: ids.len(),
            first_error: None,
        });
        ids.iter()
            .map(|id| {
                let request = self.client.build_delete_task(id);
                self.track(InFlight::ClearDelete, request)
            })
            .collect()
    }

    /// Apply one completed round-trip. Unknown tokens are ignored.
    pub fn handle_response(&mut self, token: RequestToken, response: HttpResponse) -> Applied {
        let Some(op) = self.in_flight.remove(&token) else {
            return Applied::nothing();
        };
        match op {
            InFlight::Load => match self.client.parse_list_tasks(response) {
                Ok(tasks) => {
                    self.cache.set(tasks);
                    self.load = LoadState::Loaded;
                    Applied::event(StoreEvent::ListLoaded)
                }
                Err(error) => {
                    self.load = LoadState::Failed;
                    Applied::event(StoreEvent::LoadFailed(error))
                }
            },
            InFlight::Refetch => match self.client.parse_list_tasks(response) {
                Ok(tasks) => {
                    self.cache.set(tasks);
                    Applied::event(StoreEvent::ListRefreshed)
                }
                Err(error) => Applied::event(StoreEvent::RefreshFailed(error)),
            },
            InFlight::Create => {
                self.create_in_flight -= 1;
                match self.client.parse_create_task(response) {
                    Ok(task) => self.invalidate_and_refetch(StoreEvent::TaskCreated(task)),
                    Err(error) => Applied::event(StoreEvent::CreateFailed(error)),
                }
            }
            InFlight::Update { id } => {
                self.update_in_flight -= 1;
                match self.client.parse_update_task(response) {
                    Ok(task) => self.invalidate_and_refetch(StoreEvent::TaskUpdated(task)),
                    Err(error) => Applied::event(StoreEvent::UpdateFailed { id, error }),
                }
            }
            InFlight::Delete { id } => {
                self.delete_in_flight -= 1;
                match self.client.parse_delete_task(response) {
                    Ok(()) => self.invalidate_and_refetch(StoreEvent::TaskDeleted { id }),
                    Err(error) => Applied::event(StoreEvent::DeleteFailed { id, error }),
                }
            }
            InFlight::ClearDelete => self.apply_clear_delete(response),
        }
    }

    fn track(&mut self, op: InFlight, request: HttpRequest) -> Effect {
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        self.in_flight.insert(token, op);
        Effect { token, request }
    }

    /// Invalidate the cache and issue the refetch that follows a successful
    /// mutation.
    fn invalidate_and_refetch(&mut self, event: StoreEvent) -> Applied {
        self.cache.invalidate();
        let request = self.client.build_list_tasks();
        let follow_up = self.track(InFlight::Refetch, request);
        Applied {
            event: Some(event),
            follow_up: Some(follow_up),
        }
    }

    /// Join point for the clear-completed batch: the first error wins, and
    /// nothing is reported until every delete has resolved.
    fn apply_clear_delete(&mut self, response: HttpResponse) -> Applied {
        let result = self.client.parse_delete_task(response);
        let finished = match self.clear_batch.as_mut() {
            Some(batch) => {
                batch.remaining -= 1;
                if let Err(error) = result {
                    batch.first_error.get_or_insert(error);
                }
                batch.remaining == 0
            }
            None => return Applied::nothing(),
        };
        if !finished {
            return Applied::nothing();
        }
        match self.clear_batch.take().and_then(|batch| batch.first_error) {
            Some(error) => Applied::event(StoreEvent::ClearCompletedFailed(error)),
            None => self.invalidate_and_refetch(StoreEvent::CompletedCleared),
        }
    }
}
