//! Due-tick event queue
//!
//! Host-scheduled work (spawn cadence, hunger decay, wildcard timers) is
//! queued here with an absolute due tick and polled exactly once per tick.
//! Entries carry only immutable parameters; whoever consumes a fired entry
//! checks that its target still exists before acting, so stale entries die
//! silently instead of crashing.

/// What a scheduled entry does when it comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Draw one object from the catalog
    Spawn,
    /// Apply one hunger decay step
    HungerDecay,
    /// Active wildcard destroys a neighbor; `serial` names the tracked slot
    WildZap { serial: u64 },
    /// Active wildcard's window ends; it destroys itself
    WildExpire { serial: u64 },
}

#[derive(Debug, Clone)]
struct Scheduled {
    due_tick: u64,
    /// Insertion order, breaks ties between entries due the same tick
    seq: u64,
    kind: TimerKind,
}

/// Pending scheduled events, fired in (due_tick, insertion) order
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<Scheduled>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `kind` to fire once `now >= due_tick`
    pub fn schedule(&mut self, due_tick: u64, kind: TimerKind) {
        self.entries.push(Scheduled {
            due_tick,
            seq: self.next_seq,
            kind,
        });
        self.next_seq += 1;
    }

    /// Remove every pending entry tied to the given wildcard slot
    pub fn cancel_wild(&mut self, serial: u64) {
        self.entries.retain(|e| {
            !matches!(
                e.kind,
                TimerKind::WildZap { serial: s } | TimerKind::WildExpire { serial: s } if s == serial
            )
        });
    }

    /// Pop everything due at `now`, ordered by (due_tick, insertion)
    pub fn fire_due(&mut self, now: u64) -> Vec<TimerKind> {
        let mut due: Vec<Scheduled> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due_tick <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.due_tick, e.seq));
        due.into_iter().map(|e| e.kind).collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_then_insertion_order() {
        let mut q = TimerQueue::new();
        q.schedule(10, TimerKind::HungerDecay);
        q.schedule(5, TimerKind::Spawn);
        q.schedule(5, TimerKind::WildZap { serial: 1 });

        assert!(q.fire_due(4).is_empty());
        let fired = q.fire_due(10);
        assert_eq!(
            fired,
            vec![
                TimerKind::Spawn,
                TimerKind::WildZap { serial: 1 },
                TimerKind::HungerDecay
            ]
        );
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn test_cancel_wild_removes_both_kinds() {
        let mut q = TimerQueue::new();
        q.schedule(3, TimerKind::WildZap { serial: 9 });
        q.schedule(8, TimerKind::WildExpire { serial: 9 });
        q.schedule(3, TimerKind::WildZap { serial: 2 });

        q.cancel_wild(9);
        assert_eq!(q.len(), 1);
        assert_eq!(q.fire_due(3), vec![TimerKind::WildZap { serial: 2 }]);
    }
}
