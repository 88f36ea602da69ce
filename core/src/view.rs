//! Completion transition state for the active-list view.
//!
//! # Design
//! Checking a task does not remove it from view immediately: it enters a
//! short exit animation while the update round-trip and refetch run.
//! `ExitTransitions` tracks which tasks are mid-exit as plain state over a
//! `TimerRegistry`, leaving rendering and I/O to the host. The canonical
//! list is never touched — exits are purely cosmetic and are cross-checked
//! against the live active list on every render.
//!
//! Un-completing a task from the completed panel bypasses the animation:
//! the host calls `cancel` and sends the update directly.

use std::time::{Duration, Instant};

use crate::timer::TimerRegistry;
use crate::types::Task;

/// How long an exiting task stays rendered before removal.
pub const EXIT_ANIMATION: Duration = Duration::from_millis(280);

/// Snapshot of a task kept renderable while it fades out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitPreview {
    pub id: String,
    pub text: String,
}

/// Per-task exit-animation state machine.
///
/// A task is Active until `begin` moves it to Exiting; it leaves the
/// exiting set either when its timer elapses (`tick`) or when `cancel`
/// reverts it to Active. All timers are deterministic — time is passed in
/// by the host event loop.
#[derive(Default)]
pub struct ExitTransitions {
    exiting: Vec<ExitPreview>,
    timers: TimerRegistry<String>,
}

impl ExitTransitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the exiting state for `task` and start its removal timer.
    /// A task already mid-exit keeps its timer; returns false and changes
    /// nothing.
    pub fn begin(&mut self, task: &Task, now: Instant) -> bool {
        if !self.timers.register(task.id.clone(), now, EXIT_ANIMATION) {
            return false;
        }
        if !self.exiting.iter().any(|preview| preview.id == task.id) {
            self.exiting.push(ExitPreview {
                id: task.id.clone(),
                text: task.text.clone(),
            });
        }
        true
    }

    /// Revert to the active state immediately: cancel the timer and drop
    /// the preview. Used when the update request fails and when a task is
    /// unchecked before its timer fires.
    pub fn cancel(&mut self, id: &str) {
        self.timers.cancel(id);
        self.exiting.retain(|preview| preview.id != id);
    }

    /// Drop previews whose removal timer has elapsed.
    pub fn tick(&mut self, now: Instant) {
        for id in self.timers.expired(now) {
            self.exiting.retain(|preview| preview.id != id);
        }
    }

    /// True while `id` is mid-exit.
    pub fn is_exiting(&self, id: &str) -> bool {
        self.exiting.iter().any(|preview| preview.id == id)
    }

    /// Previews still owed an exit animation, cross-checked against the
    /// live active list: a task that reappeared there (re-opened from the
    /// completed panel, restored by a refetch) is not rendered as exiting,
    /// so it cannot vanish twice.
    pub fn pending_previews<'a>(&'a self, active: &[Task]) -> Vec<&'a ExitPreview> {
        self.exiting
            .iter()
            .filter(|preview| !active.iter().any(|task| task.id == preview.id))
            .collect()
    }

    /// Teardown: cancel every timer and drop all previews.
    pub fn clear(&mut self) {
        self.timers.cancel_all();
        self.exiting.clear();
    }

    /// True when no task is mid-exit and no timer is running.
    pub fn is_idle(&self) -> bool {
        self.exiting.is_empty() && self.timers.is_empty()
    }
}

/// Split a snapshot into (active, completed) halves, preserving order.
pub fn split_by_done(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    tasks.iter().partition(|task| !task.done)
}

/// Fraction of the list that is done; 0 for an empty list.
pub fn completion_ratio(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let done = tasks.iter().filter(|task| task.done).count();
    done as f64 / tasks.len() as f64
}
