//! Deterministic per-key timer registry.
//!
//! # Design
//! Deadlines are plain data and time is always passed in by the caller, so
//! the registry can be driven from any event loop and tested without
//! sleeping. `expired` drains due timers; acting on the returned keys is the
//! caller's job.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub struct TimerRegistry<K> {
    deadlines: HashMap<K, Instant>,
}

impl<K: Eq + Hash + Clone> TimerRegistry<K> {
    pub fn new() -> Self {
        Self {
            deadlines: HashMap::new(),
        }
    }

    /// Start a timer for `key` firing at `now + delay`. A key that already
    /// has a timer keeps its original deadline; returns false and changes
    /// nothing.
    pub fn register(&mut self, key: K, now: Instant, delay: Duration) -> bool {
        if self.deadlines.contains_key(&key) {
            return false;
        }
        self.deadlines.insert(key, now + delay);
        true
    }

    /// Cancel the timer for `key`. Returns false if none was running.
    pub fn cancel<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.deadlines.remove(key).is_some()
    }

    /// Cancel every timer. Called on teardown.
    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.deadlines.contains_key(key)
    }

    /// Remove and return every key whose deadline has passed.
    pub fn expired(&mut self, now: Instant) -> Vec<K> {
        let due: Vec<K> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &due {
            self.deadlines.remove(key);
        }
        due
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }
}

impl<K: Eq + Hash + Clone> Default for TimerRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
