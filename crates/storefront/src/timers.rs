//! Delayed UI effects.
//!
//! Transient effects (an "added" button reverting to its normal label, a toast
//! disappearing) are scheduled against a key naming the element or
//! notification they act on. Scheduling again under the same key replaces the
//! pending effect, so a fresh action always wins over a stale one.
//!
//! The scheduler never runs anything itself; the host polls
//! [`Scheduler::take_due`] with the current time.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::trace;

/// What a pending effect acts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKey {
    /// An add-to-cart button, by element id.
    ButtonRevert(String),
    /// A toast notification, by notification id.
    Toast(String),
}

#[derive(Debug)]
struct Pending<A> {
    deadline: DateTime<Utc>,
    seq: u64,
    action: A,
}

/// Keyed, cancellable one-shot timers.
#[derive(Debug)]
pub struct Scheduler<A> {
    pending: BTreeMap<TimerKey, Pending<A>>,
    next_seq: u64,
}

impl<A> Scheduler<A> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `action` to fire at `deadline`.
    ///
    /// Returns the action this replaced, if one was pending under `key`.
    pub fn schedule(&mut self, key: TimerKey, deadline: DateTime<Utc>, action: A) -> Option<A> {
        let seq = self.next_seq;
        self.next_seq += 1;
        let replaced = self.pending.insert(
            key.clone(),
            Pending {
                deadline,
                seq,
                action,
            },
        );
        if replaced.is_some() {
            trace!(?key, "Superseded pending timer");
        }
        replaced.map(|pending| pending.action)
    }

    /// Schedule `action` to fire `delay` after `now`.
    pub fn schedule_in(
        &mut self,
        key: TimerKey,
        now: DateTime<Utc>,
        delay: TimeDelta,
        action: A,
    ) -> Option<A> {
        self.schedule(key, now + delay, action)
    }

    /// Drop the effect pending under `key`, returning it.
    pub fn cancel(&mut self, key: &TimerKey) -> Option<A> {
        self.pending.remove(key).map(|pending| pending.action)
    }

    #[must_use]
    pub fn is_pending(&self, key: &TimerKey) -> bool {
        self.pending.contains_key(key)
    }

    /// Earliest deadline among pending effects.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.values().map(|pending| pending.deadline).min()
    }

    /// Remove and return every effect due at `now`, earliest deadline first.
    /// Effects sharing a deadline come out in the order they were scheduled.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<(TimerKey, A)> {
        let due_keys: Vec<TimerKey> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();

        let mut due: Vec<(TimerKey, Pending<A>)> = due_keys
            .into_iter()
            .filter_map(|key| self.pending.remove(&key).map(|pending| (key, pending)))
            .collect();
        due.sort_by_key(|(_, pending)| (pending.deadline, pending.seq));
        due.into_iter()
            .map(|(key, pending)| (key, pending.action))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 8, 12, 0, 0).unwrap()
    }

    fn ms(n: i64) -> TimeDelta {
        TimeDelta::milliseconds(n)
    }

    fn button(id: &str) -> TimerKey {
        TimerKey::ButtonRevert(id.to_string())
    }

    #[test]
    fn test_nothing_due_before_deadline() {
        let mut timers = Scheduler::new();
        timers.schedule_in(button("b1"), t0(), ms(2_000), "revert");
        assert!(timers.take_due(t0() + ms(1_999)).is_empty());
        assert_eq!(timers.take_due(t0() + ms(2_000)), vec![(button("b1"), "revert")]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_reschedule_supersedes() {
        let mut timers = Scheduler::new();
        assert!(timers.schedule_in(button("b1"), t0(), ms(2_000), 1).is_none());
        // Clicked again a second later: the first revert must not fire early
        let replaced = timers.schedule_in(button("b1"), t0() + ms(1_000), ms(2_000), 2);
        assert_eq!(replaced, Some(1));
        assert_eq!(timers.len(), 1);

        assert!(timers.take_due(t0() + ms(2_500)).is_empty());
        assert_eq!(timers.take_due(t0() + ms(3_000)), vec![(button("b1"), 2)]);
    }

    #[test]
    fn test_cancel() {
        let mut timers = Scheduler::new();
        let key = TimerKey::Toast("toast-1".to_string());
        timers.schedule_in(key.clone(), t0(), ms(3_000), ());
        assert!(timers.is_pending(&key));
        assert_eq!(timers.cancel(&key), Some(()));
        assert!(!timers.is_pending(&key));
        assert!(timers.take_due(t0() + ms(10_000)).is_empty());
        assert_eq!(timers.cancel(&key), None);
    }

    #[test]
    fn test_due_in_deadline_then_schedule_order() {
        let mut timers = Scheduler::new();
        timers.schedule(TimerKey::Toast("z".to_string()), t0() + ms(5), "late");
        timers.schedule(button("y"), t0() + ms(1), "tie-first");
        timers.schedule(button("a"), t0() + ms(1), "tie-second");
        timers.schedule(button("never"), t0() + ms(100), "pending");

        assert_eq!(timers.next_deadline(), Some(t0() + ms(1)));
        let due: Vec<_> = timers
            .take_due(t0() + ms(10))
            .into_iter()
            .map(|(_, action)| action)
            .collect();
        assert_eq!(due, vec!["tie-first", "tie-second", "late"]);
        assert_eq!(timers.next_deadline(), Some(t0() + ms(100)));
    }
}
