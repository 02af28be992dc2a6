//! Collection stack with run-based compaction
//!
//! Every collected item lands on top of an ordered stack. Three or more
//! adjacent slots of one type collapse; a run of three wildcards outranks a
//! plain match and wipes the whole stack. A wildcard that survives its own
//! landing runs a timed destructive effect against its neighbors. Running
//! out of room is how the session ends badly.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, ItemKind, LossReason};
use super::timers::TimerKind;
use crate::consts::*;
use crate::secs_to_ticks;

/// One stack slot; `serial` survives compaction and names the slot for timers
#[derive(Debug, Clone)]
pub struct Slot {
    pub serial: u64,
    pub kind: ItemKind,
    pub is_wild: bool,
    /// Where the renderer should draw this slot, recomputed on every reflow
    pub target_pos: Vec2,
}

/// Outcome of one compaction pass
#[derive(Debug, Clone, PartialEq)]
enum RunClear {
    /// A run of `len` slots of `kind` was removed
    Run { kind: ItemKind, len: usize },
    /// An all-wildcard run wiped the stack
    All,
}

/// The player's ordered collection stack
#[derive(Debug, Clone)]
pub struct SnackStack {
    slots: Vec<Slot>,
    capacity: usize,
    next_serial: u64,
    /// Serial of the slot owning the one permitted wildcard effect
    active_wild: Option<u64>,
}

impl SnackStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            next_serial: 1,
            active_wild: None,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn active_wild(&self) -> Option<u64> {
        self.active_wild
    }

    fn contains(&self, serial: u64) -> bool {
        self.slots.iter().any(|s| s.serial == serial)
    }

    fn index_of(&self, serial: u64) -> Option<usize> {
        self.slots.iter().position(|s| s.serial == serial)
    }

    /// Recompute display targets: bottom slot at the base, rising per index
    fn reflow(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.target_pos = Vec2::new(STACK_X, STACK_BASE_Y - i as f32 * STACK_STEP);
        }
    }

    /// Push a new top slot. Caller has already checked capacity.
    fn push(&mut self, kind: ItemKind, is_wild: bool) -> u64 {
        debug_assert!(!self.is_full());
        let serial = self.next_serial;
        self.next_serial += 1;
        self.slots.push(Slot {
            serial,
            kind,
            is_wild,
            target_pos: Vec2::ZERO,
        });
        self.reflow();
        serial
    }

    /// Maximal run of equal-type slots starting at `start`
    fn run_at(&self, start: usize) -> (usize, ItemKind) {
        let kind = self.slots[start].kind;
        let mut end = start + 1;
        while end < self.slots.len() && self.slots[end].kind == kind {
            end += 1;
        }
        (end - start, kind)
    }

    /// One compaction pass: resolve the first qualifying run in scan order.
    /// A wildcard run outranks a plain match and wipes everything. At most
    /// one removal per pass.
    fn compact_first_run(&mut self, removed: &mut Vec<u64>) -> Option<RunClear> {
        let mut start = 0;
        while start < self.slots.len() {
            let (len, kind) = self.run_at(start);
            if len < 3 {
                start += len;
                continue;
            }
            return if self.slots[start].is_wild {
                removed.extend(self.slots.iter().map(|s| s.serial));
                self.slots.clear();
                self.reflow();
                Some(RunClear::All)
            } else {
                removed.extend(self.slots[start..start + len].iter().map(|s| s.serial));
                drop(self.slots.drain(start..start + len));
                self.reflow();
                Some(RunClear::Run { kind, len })
            };
        }
        None
    }

    /// Remove one slot by serial, keeping survivor order
    fn remove(&mut self, serial: u64) -> Option<Slot> {
        let idx = self.index_of(serial)?;
        let slot = self.slots.remove(idx);
        self.reflow();
        Some(slot)
    }
}

/// Append a collected item to the stack, running the match pass and the
/// wildcard bookkeeping. Overflow resolves the session instead of mutating.
pub(crate) fn append(state: &mut GameState, kind: ItemKind, is_wild: bool) {
    if state.stack.is_full() {
        log::info!("stack overflow at height {}", state.stack.len());
        state.resolve_loss(LossReason::StackOverflow);
        return;
    }

    let serial = state.stack.push(kind, is_wild);

    let mut removed = Vec::new();
    match state.stack.compact_first_run(&mut removed) {
        Some(RunClear::All) => {
            log::info!("wildcard run cleared the stack");
            state.events.push(GameEvent::StackCleared);
        }
        Some(RunClear::Run { kind, len }) => {
            log::debug!("cleared a run of {len} {}", kind.as_str());
            state.events.push(GameEvent::RunCleared { kind, len });
        }
        None => {}
    }
    invalidate_removed(state, &removed);

    // A wildcard that survived its own landing starts its decay window,
    // unless another wildcard's effect is already running (one at a time)
    if is_wild && state.stack.contains(serial) && state.stack.active_wild().is_none() {
        start_wild_effect(state, serial);
    }
}

fn start_wild_effect(state: &mut GameState, serial: u64) {
    state.stack.active_wild = Some(serial);
    let now = state.time_ticks;
    let expire = now + secs_to_ticks(state.tuning.wild_window_secs);
    state.timers.schedule(expire, TimerKind::WildExpire { serial });
    schedule_next_zap(state, serial);
    log::debug!("wildcard effect armed on slot {serial}");
}

fn schedule_next_zap(state: &mut GameState, serial: u64) {
    let (lo, hi) = (
        state.tuning.wild_zap_min_secs,
        state.tuning.wild_zap_max_secs,
    );
    let delay = state.rng.random_range(lo..=hi);
    let due = state.time_ticks + secs_to_ticks(delay);
    state.timers.schedule(due, TimerKind::WildZap { serial });
}

/// Fired zap timer. Validates the tracked slot first: a slot removed by any
/// other path since scheduling cancels the effect silently.
pub(crate) fn on_wild_zap(state: &mut GameState, serial: u64) {
    if state.stack.active_wild() != Some(serial) {
        return;
    }
    let Some(idx) = state.stack.index_of(serial) else {
        return;
    };
    let slots = state.stack.slots();
    let left = idx
        .checked_sub(1)
        .filter(|&i| !slots[i].is_wild)
        .map(|i| slots[i].serial);
    let right = slots
        .get(idx + 1)
        .filter(|s| !s.is_wild)
        .map(|s| s.serial);

    let victim = match (left, right) {
        (Some(l), Some(r)) => Some(if state.rng.random_bool(0.5) { l } else { r }),
        (Some(l), None) => Some(l),
        (None, Some(r)) => Some(r),
        // No eligible neighbor this time; the window keeps running
        (None, None) => None,
    };

    if let Some(victim) = victim
        && let Some(slot) = state.stack.remove(victim)
    {
        log::debug!("wildcard zapped a {} slot", slot.kind.as_str());
        state.events.push(GameEvent::SlotZapped { kind: slot.kind });
    }

    schedule_next_zap(state, serial);
}

/// Fired expiry timer: the wildcard destroys itself and the effect ends
pub(crate) fn on_wild_expire(state: &mut GameState, serial: u64) {
    if state.stack.active_wild() != Some(serial) {
        return;
    }
    state.stack.active_wild = None;
    state.timers.cancel_wild(serial);
    if state.stack.remove(serial).is_some() {
        log::debug!("wildcard burned out");
    }
}

/// After any removal path, drop the wildcard effect if its slot is gone
fn invalidate_removed(state: &mut GameState, removed: &[u64]) {
    if let Some(active) = state.stack.active_wild()
        && removed.contains(&active)
    {
        state.stack.active_wild = None;
        state.timers.cancel_wild(active);
    }
}
