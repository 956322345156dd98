//! Deferred fire-once timers
//!
//! The host owns the real clock. Everything that happens "later" is queued
//! here against absolute due times and handed back by [`Timeline::advance_to`]
//! once the host reports that time has passed. Entries are never cancelled
//! individually; [`Timeline::clear`] drops everything on teardown.

/// A queued entry
#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: f64,
    seq: u64,
    item: T,
}

/// Queue of deferred items keyed by due time (ms)
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    now: f64,
    next_seq: u64,
    entries: Vec<Scheduled<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Last time reported by the host
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of entries still waiting
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue `item` to fire `delay_ms` after the current time.
    /// Returns the absolute due time.
    pub fn schedule(&mut self, delay_ms: f64, item: T) -> f64 {
        let due = self.now + delay_ms.max(0.0);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Scheduled { due, seq, item });
        due
    }

    /// Move the clock forward and take every item whose due time has passed,
    /// earliest first (ties in scheduling order). The clock never runs backwards.
    pub fn advance_to(&mut self, now: f64) -> Vec<T> {
        if now > self.now {
            self.now = now;
        }
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.due <= now);
        self.entries = waiting;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.item).collect()
    }

    /// Drop every waiting entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_fire_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(300.0, "b");
        timeline.schedule(0.0, "a");
        timeline.schedule(600.0, "c");

        assert_eq!(timeline.advance_to(299.0), vec!["a"]);
        assert_eq!(timeline.advance_to(1000.0), vec!["b", "c"]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let mut timeline = Timeline::new();
        for i in 0..5 {
            timeline.schedule(100.0, i);
        }
        assert_eq!(timeline.advance_to(100.0), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_delay_is_relative_to_current_time() {
        let mut timeline = Timeline::new();
        timeline.advance_to(5000.0);
        let due = timeline.schedule(1000.0, ());
        assert_eq!(due, 6000.0);
        assert!(timeline.advance_to(5999.0).is_empty());
        assert_eq!(timeline.advance_to(6000.0).len(), 1);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut timeline = Timeline::<()>::new();
        timeline.advance_to(1000.0);
        timeline.advance_to(10.0);
        assert_eq!(timeline.now(), 1000.0);
    }

    #[test]
    fn test_clear_drops_waiting_entries() {
        let mut timeline = Timeline::new();
        timeline.schedule(250.0, 1);
        timeline.schedule(50.0, 2);
        assert_eq!(timeline.pending(), 2);
        timeline.clear();
        assert_eq!(timeline.pending(), 0);
        assert!(timeline.advance_to(1e9).is_empty());
    }
}
