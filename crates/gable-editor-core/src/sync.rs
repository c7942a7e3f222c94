//! Debounced synchronization of surface content into document state.
//!
//! The surface serializes its full content on every change, which can
//! mean once per keystroke. Writing that into document state - and the
//! persistence pipeline behind it - at keystroke rate would swamp
//! downstream consumers, so each notification re-arms a deadline and
//! the write commits only after a quiet period.
//!
//! Formatting attributes (active font size/family) deliberately bypass
//! this path; see [`crate::types::ActiveFormats`].

use std::time::Duration;
use web_time::Instant;

/// Debounces the surface's content notifications.
///
/// Owned by the editing session and torn down with it - the deadline
/// lives here, never in module-level state, so sessions cannot leak
/// timers into each other.
#[derive(Debug)]
pub struct ContentSync {
    delay: Duration,
    pending: Option<PendingWrite>,
}

#[derive(Debug)]
struct PendingWrite {
    content: String,
    deadline: Instant,
}

impl ContentSync {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a content-change notification at `now`.
    ///
    /// Replaces any pending write and pushes the deadline out; a burst
    /// of notifications inside the window commits once, with the last
    /// content.
    pub fn content_changed(&mut self, content: String, now: Instant) {
        self.pending = Some(PendingWrite {
            content,
            deadline: now + self.delay,
        });
    }

    /// Commit the pending write if its deadline has passed.
    ///
    /// Returns the content to write into document state, at most once
    /// per quiet period. Last write wins; a commit never carries older
    /// content than a previous commit.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|write| now >= write.deadline);
        if due {
            self.pending.take().map(|write| write.content)
        } else {
            None
        }
    }

    /// Commit the pending write immediately.
    ///
    /// Called at session teardown so the last keystrokes before
    /// navigation are not lost to the quiet period.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|write| write.content)
    }

    /// Whether a write is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending write without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
