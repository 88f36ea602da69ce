//! The canonical task-list cache.
//!
//! # Design
//! An explicit cache object standing in for a reactive query cache: `get`
//! returns the last snapshot confirmed by the server, `set` replaces it
//! wholesale and notifies subscribers, `invalidate` marks it stale so the
//! store issues a refetch. The view reads through `get` and never mutates
//! cached data; the only write path is the store's invalidate-then-refetch.

use crate::types::Task;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

/// Callback invoked with the new snapshot on every `set`.
pub type Subscriber = Box<dyn FnMut(&[Task])>;

#[derive(Default)]
pub struct ListCache {
    tasks: Vec<Task>,
    stale: bool,
    next_id: u64,
    subscribers: Vec<(SubscriberId, Subscriber)>,
}

impl ListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot; empty before the first `set`.
    pub fn get(&self) -> &[Task] {
        &self.tasks
    }

    /// Replace the snapshot wholesale, mark it fresh, notify subscribers.
    pub fn set(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.stale = false;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.tasks);
        }
    }

    /// Mark the snapshot stale. The data stays readable until the next `set`.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    /// Remove a subscriber. Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn task(id: &str, done: bool) -> Task {
        Task {
            id: id.to_string(),
            text: format!("task {id}"),
            done,
            created_at: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn starts_empty_and_fresh() {
        let cache = ListCache::new();
        assert!(cache.get().is_empty());
        assert!(!cache.is_stale());
    }

    #[test]
    fn set_replaces_snapshot_and_clears_staleness() {
        let mut cache = ListCache::new();
        cache.invalidate();
        cache.set(vec![task("t-1", false)]);
        assert_eq!(cache.get().len(), 1);
        assert!(!cache.is_stale());
    }

    #[test]
    fn invalidate_keeps_data_readable() {
        let mut cache = ListCache::new();
        cache.set(vec![task("t-1", false)]);
        cache.invalidate();
        assert!(cache.is_stale());
        assert_eq!(cache.get().len(), 1);
    }

    #[test]
    fn subscribers_see_every_set() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut cache = ListCache::new();
        cache.subscribe(Box::new(move |tasks| {
            sink.borrow_mut().push(tasks.len());
        }));

        cache.set(vec![task("t-1", false)]);
        cache.set(vec![task("t-1", false), task("t-2", true)]);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn unsubscribed_callbacks_stop_firing() {
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);

        let mut cache = ListCache::new();
        let id = cache.subscribe(Box::new(move |_| {
            *sink.borrow_mut() += 1;
        }));

        cache.set(vec![task("t-1", false)]);
        assert!(cache.unsubscribe(id));
        assert!(!cache.unsubscribe(id));
        cache.set(Vec::new());
        assert_eq!(*seen.borrow(), 1);
    }
}
