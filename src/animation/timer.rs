use std::collections::{BTreeMap, HashMap};

use crate::foundation::core::Millis;

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct TimerId(pub u64);

/// Virtual-time timer queue for a single logical thread.
///
/// Tasks fire in `(due, schedule order)` order. Cancellation removes the entry, so a
/// cancelled task can never be returned by [`TimerQueue::pop_due`].
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: BTreeMap<(Millis, u64), T>,
    due_by_id: HashMap<u64, Millis>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }

    pub fn schedule(&mut self, due: Millis, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert((due, id), task);
        self.due_by_id.insert(id, due);
        TimerId(id)
    }

    /// Remove a pending timer. Returns the task if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let due = self.due_by_id.remove(&id.0)?;
        self.pending.remove(&(due, id.0))
    }

    pub fn due_at(&self, id: TimerId) -> Option<Millis> {
        self.due_by_id.get(&id.0).copied()
    }

    /// Pop the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerId, Millis, T)> {
        let (&(due, id), _) = self.pending.first_key_value()?;
        if due > now {
            return None;
        }
        let task = self.pending.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        Some((TimerId(id), due, task))
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.pending.first_key_value().map(|(&(due, _), _)| due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timer.rs"]
mod tests;
