use std::time::{Duration, Instant};

use crate::document::model::LayoutDocument;

/// Debounced, single-slot save scheduling.
///
/// Each change replaces the pending document and pushes its deadline to `now + debounce`, so a
/// burst of edits produces one save, fired `debounce` after the last edit. After a save settles
/// (successfully or not) the "saving" indicator stays visible for a fixed window.
///
/// Time is passed in explicitly; the scheduler never reads a clock.
#[derive(Clone, Debug)]
pub struct SaveScheduler {
    debounce: Duration,
    indicator: Duration,
    pending: Option<(Instant, LayoutDocument)>,
    indicator_until: Option<Instant>,
}

impl SaveScheduler {
    /// Scheduler with the given debounce and indicator windows.
    pub fn new(debounce: Duration, indicator: Duration) -> Self {
        Self {
            debounce,
            indicator,
            pending: None,
            indicator_until: None,
        }
    }

    /// Record a document change, superseding any pending save.
    pub fn schedule(&mut self, doc: LayoutDocument, now: Instant) {
        self.pending = Some((now + self.debounce, doc));
    }

    /// Deadline of the pending save, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// True while a change is waiting for its debounce window.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending document once its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<LayoutDocument> {
        let due = self.pending.as_ref().is_some_and(|(at, _)| *at <= now);
        if !due {
            return None;
        }
        self.pending.take().map(|(_, doc)| doc)
    }

    /// Take the pending document regardless of its deadline (shutdown flush).
    pub fn flush(&mut self) -> Option<LayoutDocument> {
        self.pending.take().map(|(_, doc)| doc)
    }

    /// A save settled at `now`; show the indicator until `now + indicator`.
    pub fn mark_settled(&mut self, now: Instant) {
        self.indicator_until = Some(now + self.indicator);
    }

    /// Whether the "saving" indicator should be visible at `now`.
    pub fn is_saving(&self, now: Instant) -> bool {
        self.indicator_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/debounce.rs"]
mod tests;
