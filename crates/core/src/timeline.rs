//! Deterministic scheduler for timed phase transitions.
//!
//! Staged transitions (activate, wait, reveal, wait, fade) are usually
//! written as chained real timers. A [`Timeline`] makes the sequence
//! explicit and testable instead: callers schedule tagged entries
//! against a manually driven clock and collect fired tags from
//! [`advance_to`](Timeline::advance_to). Nothing here reads wall-clock time.

/// A scheduled, cancellable set of tagged deadlines on a manual clock.
///
/// Entries fire when the clock passes their deadline. Simultaneous
/// deadlines fire in scheduling order. The clock never moves backwards;
/// advancing to an earlier time is a no-op.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    now_ms: f64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    id: u64,
    fire_at_ms: f64,
    tag: T,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    /// Creates an empty timeline with its clock at 0.
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// The current clock reading in milliseconds.
    pub fn now(&self) -> f64 {
        self.now_ms
    }

    /// Schedules `tag` to fire `delay_ms` after the current clock reading.
    /// Negative delays are treated as zero (fire on the next advance).
    ///
    /// Returns an id usable with [`cancel`](Timeline::cancel).
    pub fn schedule(&mut self, delay_ms: f64, tag: T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            fire_at_ms: self.now_ms + delay_ms.max(0.0),
            tag,
        });
        id
    }

    /// Cancels a pending entry. Returns whether anything was removed.
    pub fn cancel(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drops every pending entry without firing it.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries still pending.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Moves the clock to `now_ms` and returns the tags of every entry whose
    /// deadline passed, ordered by deadline (ties by scheduling order).
    ///
    /// Moving the clock backwards fires nothing and leaves it unchanged.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<T> {
        if now_ms < self.now_ms {
            return Vec::new();
        }
        self.now_ms = now_ms;
        let mut due: Vec<Entry<T>> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].fire_at_ms <= now_ms {
                due.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| {
            a.fire_at_ms
                .partial_cmp(&b.fire_at_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        due.into_iter().map(|e| e.tag).collect()
    }
}
