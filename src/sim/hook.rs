//! Claw lifecycle state machine
//!
//! The claw is the one falling object that is never collected. It descends
//! on a rope; touching it gets the player grabbed and hauled upward. Lateral
//! wiggling builds tension, and crossing the escape threshold breaks the
//! grip - at a steeper threshold each time.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState, LossReason};
use super::tick::TickInput;
use crate::consts::*;

/// Claw lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookPhase {
    /// No claw on the field, none pending
    #[default]
    Idle,
    /// Claw is falling, rope armed
    Descending,
    /// Player grabbed; tension contest running
    Attached,
    /// Post-escape grace period; no claw may be drawn
    Cooldown,
}

/// Claw controller state
#[derive(Debug, Clone)]
pub struct HookState {
    pub phase: HookPhase,
    /// The claw's entity id while Descending/Attached
    pub object_id: Option<u32>,
    /// Rope anchor x, recorded at spawn for the renderer
    pub anchor_x: f32,
    /// Escape progress, >= 0
    pub tension: f32,
    /// Threshold multiplier, >= 1, never decreases within a session
    pub difficulty: f32,
    /// Ticks left in Cooldown
    pub cooldown_ticks: u32,
}

impl Default for HookState {
    fn default() -> Self {
        Self {
            phase: HookPhase::Idle,
            object_id: None,
            anchor_x: 0.0,
            tension: 0.0,
            difficulty: 1.0,
            cooldown_ticks: 0,
        }
    }
}

impl HookState {
    /// A claw is live while it is on the field (falling or holding the player)
    pub fn is_live(&self) -> bool {
        matches!(self.phase, HookPhase::Descending | HookPhase::Attached)
    }

    /// The spawner must not draw a claw while one is live or cooling down
    pub fn blocks_spawn(&self) -> bool {
        self.is_live() || self.phase == HookPhase::Cooldown
    }

    /// Idle -> Descending: a claw object just spawned at `anchor_x`
    pub fn arm(&mut self, object_id: u32, anchor_x: f32) {
        debug_assert_eq!(self.phase, HookPhase::Idle);
        self.phase = HookPhase::Descending;
        self.object_id = Some(object_id);
        self.anchor_x = anchor_x;
        self.tension = 0.0;
        log::debug!("claw armed at x={anchor_x:.1}");
    }

    fn clear(&mut self, phase: HookPhase) {
        self.phase = phase;
        self.object_id = None;
        self.tension = 0.0;
    }
}

/// Descending -> Attached, driven by the physics host's overlap report.
/// Sets the claw's velocity to the fixed upward retract speed.
pub(crate) fn attach(state: &mut GameState) {
    let Some(id) = state.hook.object_id else {
        return;
    };
    state.hook.phase = HookPhase::Attached;
    let retract_speed = state.tuning.retract_speed;
    if let Some(obj) = state.object_mut(id) {
        obj.vel = Vec2::new(0.0, -retract_speed);
    }
    log::info!("claw grabbed the player");
    state.events.push(GameEvent::HookAttached);
}

/// Per-tick claw update, after movement and overlap resolution
pub(crate) fn update(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.hook.phase {
        HookPhase::Idle => {}

        HookPhase::Descending => {
            // A claw that reaches the floor unattached just leaves, no cooldown
            let gone = state
                .hook
                .object_id
                .and_then(|id| state.object(id))
                .is_none_or(|o| o.pos.y > DESPAWN_Y);
            if gone {
                if let Some(id) = state.hook.object_id {
                    state.destroy_object(id);
                }
                state.hook.clear(HookPhase::Idle);
                log::debug!("claw left the field unattached");
            }
        }

        HookPhase::Attached => update_attached(state, input, dt),

        HookPhase::Cooldown => {
            state.hook.cooldown_ticks = state.hook.cooldown_ticks.saturating_sub(1);
            if state.hook.cooldown_ticks == 0 {
                state.hook.phase = HookPhase::Idle;
                log::debug!("claw cooldown over");
            }
        }
    }
}

fn update_attached(state: &mut GameState, input: &TickInput, dt: f32) {
    let Some(id) = state.hook.object_id else {
        state.hook.clear(HookPhase::Idle);
        return;
    };

    let tuning = state.tuning.clone();

    // Wiggle builds tension; decay bleeds it every tick regardless
    if input.dragging {
        state.hook.tension += input.drag_delta.abs() * tuning.wiggle_gain;
    }
    state.hook.tension = (state.hook.tension - tuning.tension_decay_per_sec * dt).max(0.0);

    // Player hangs from the claw; the claw tracks the player's wiggling
    let player_x = state.player.pos.x;
    let hook_y = match state.object_mut(id) {
        Some(obj) => {
            obj.pos.x = player_x;
            obj.pos.y
        }
        None => {
            state.hook.clear(HookPhase::Idle);
            return;
        }
    };
    state.player.pos.y = hook_y + tuning.attach_offset_y;

    // Stamina drains faster the more escapes are behind the player
    state.stamina =
        (state.stamina - tuning.stamina_drain_per_sec * state.hook.difficulty * dt).max(0.0);
    if state.stamina <= 0.0 {
        state.resolve_loss(LossReason::Exhausted);
        return;
    }

    let threshold = tuning.tension_threshold(state.hook.difficulty);

    // Near-escape cue for the renderer; never gates a transition
    if state.hook.tension >= threshold * tuning.shake_warn_ratio {
        state.shake = (state.shake + 0.2).min(1.0);
    }

    if state.hook.tension >= threshold {
        break_free(state, id);
    } else if hook_y <= 0.0 {
        // Hauled off the top of the field
        state.destroy_object(id);
        state.hook.clear(HookPhase::Idle);
        state.resolve_loss(LossReason::HookedAway);
    }
}

/// Attached -> Cooldown: the player wiggled free
fn break_free(state: &mut GameState, claw_id: u32) {
    state.destroy_object(claw_id);
    state.player.pos.y = PLAYER_BASELINE_Y;
    state.hook.clear(HookPhase::Cooldown);
    state.hook.difficulty += state.tuning.difficulty_step;
    state.hook.cooldown_ticks = state.tuning.cooldown_ticks();
    log::info!(
        "player broke free; difficulty now {:.2}",
        state.hook.difficulty
    );
    state.events.push(GameEvent::BreakFree {
        difficulty: state.hook.difficulty,
    });
    debug_assert_eq!(state.phase, GamePhase::Playing);
}
