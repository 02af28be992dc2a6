//! Fixed timestep simulation tick
//!
//! One call advances the whole session by `SIM_DT`. In-tick ordering is
//! fixed and load-bearing: scheduled events, then input and player movement,
//! then velocity integration, then overlap resolution, then claw/stack/
//! bookkeeping mutation. Tension and overlap always see post-movement
//! positions.

use super::hook::{self, HookPhase};
use super::spawn;
use super::stack;
use super::state::{GameEvent, GamePhase, GameState, LossReason, PhysicsHost, Player};
use super::timers::TimerKind;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Absolute pointer x while dragging
    pub target_x: Option<f32>,
    /// Keyboard direction, -1.0 / 0.0 / 1.0
    pub move_dir: f32,
    /// Lateral pointer movement this tick; only its magnitude is consumed
    pub drag_delta: f32,
    /// Pointer is actively dragging
    pub dragging: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, physics: &impl PhysicsHost, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Decay camera shake
    state.shake *= 0.9;
    if state.shake < 0.01 {
        state.shake = 0.0;
    }

    // 1. Scheduled work due this tick
    for kind in state.timers.fire_due(state.time_ticks) {
        if state.phase != GamePhase::Playing {
            break;
        }
        match kind {
            TimerKind::Spawn => {
                spawn::spawn_falling_object(state);
                let due = state.time_ticks + state.tuning.spawn_interval_ticks();
                state.timers.schedule(due, TimerKind::Spawn);
            }
            TimerKind::HungerDecay => {
                apply_hunger_decay(state);
                let due = state.time_ticks + state.tuning.hunger_interval_ticks();
                state.timers.schedule(due, TimerKind::HungerDecay);
            }
            TimerKind::WildZap { serial } => stack::on_wild_zap(state, serial),
            TimerKind::WildExpire { serial } => stack::on_wild_expire(state, serial),
        }
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    // 2. Input and player movement (x only; the claw owns y while attached)
    if let Some(target) = input.target_x {
        state.player.pos.x = Player::clamp_x(target);
    } else if input.move_dir != 0.0 {
        let x = state.player.pos.x + input.move_dir.signum() * state.tuning.player_speed * dt;
        state.player.pos.x = Player::clamp_x(x);
    }

    // 3. Velocity integration, delegated to the physics host
    for obj in &mut state.objects {
        physics.integrate(&mut obj.pos, obj.vel, dt);
    }

    // 4. Overlap resolution
    let player_bounds = state.player.bounds();
    let caught: Vec<u32> = state
        .objects
        .iter()
        .filter(|o| !o.is_hook && physics.overlap(&player_bounds, &o.bounds()))
        .map(|o| o.id)
        .collect();
    for id in caught {
        if state.phase != GamePhase::Playing {
            break;
        }
        collect(state, id);
    }

    let grabbed = state.phase == GamePhase::Playing
        && state.hook.phase == HookPhase::Descending
        && state
            .hook
            .object_id
            .and_then(|id| state.object(id))
            .is_some_and(|claw| physics.overlap(&player_bounds, &claw.bounds()));
    if grabbed {
        hook::attach(state);
    }

    // 5. Claw contest, despawn sweep
    if state.phase == GamePhase::Playing {
        hook::update(state, input, dt);
    }
    state
        .objects
        .retain(|o| o.is_hook || o.pos.y <= DESPAWN_Y);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Apply one collection: score, hunger, stamina, stack, win/loss checks
fn collect(state: &mut GameState, id: u32) {
    let Some(obj) = state.object(id) else {
        return;
    };
    let (kind, value, is_wild) = (obj.kind, obj.value, obj.is_wild);
    state.destroy_object(id);

    state.score += value as i64;
    state.hunger = (state.hunger + value as f32).clamp(0.0, HUNGER_MAX);
    let refill = (value as f32).max(state.tuning.stamina_refill_min);
    state.stamina = (state.stamina + refill).clamp(0.0, state.tuning.max_stamina);
    state.events.push(GameEvent::Collected { kind, value });

    stack::append(state, kind, is_wild);
    if state.phase != GamePhase::Playing {
        return;
    }

    if state.hunger <= 0.0 {
        state.resolve_loss(LossReason::Starved);
    } else if state.score >= state.tuning.winning_score && state.hunger >= HUNGER_MAX {
        state.resolve_win();
    }
}

/// One passive hunger decay step
fn apply_hunger_decay(state: &mut GameState) {
    state.hunger = (state.hunger - state.tuning.hunger_decay_rate).max(0.0);
    if state.hunger <= 0.0 {
        state.resolve_loss(LossReason::Starved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::SIM_DT;
    use crate::platform::AabbPhysics;
    use crate::sim::state::{FallingObject, ItemKind, Outcome};
    use glam::Vec2;

    /// Tuning with the ambient churn (spawns, hunger decay) parked far away
    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_interval_secs: 100_000.0,
            hunger_decay_interval_secs: 100_000.0,
            ..Default::default()
        }
    }

    fn place_claw(state: &mut GameState, pos: Vec2, vy: f32) -> u32 {
        let id = state.next_entity_id();
        state.objects.push(FallingObject {
            id,
            kind: ItemKind::Claw,
            value: 5,
            pos,
            vel: Vec2::new(0.0, vy),
            is_hook: true,
            is_wild: false,
        });
        state.hook.arm(id, pos.x);
        id
    }

    fn run_ticks(
        state: &mut GameState,
        input: &TickInput,
        ticks: u64,
        events: &mut Vec<(u64, GameEvent)>,
    ) {
        let physics = AabbPhysics;
        for _ in 0..ticks {
            tick(state, input, &physics, SIM_DT);
            let t = state.time_ticks;
            events.extend(state.drain_events().into_iter().map(|e| (t, e)));
        }
    }

    #[test]
    fn test_hanging_limp_loses_exactly_once() {
        let mut state = GameState::new(11, quiet_tuning());
        let player_pos = state.player.pos;
        place_claw(&mut state, player_pos, 150.0);

        let mut events = Vec::new();
        run_ticks(&mut state, &TickInput::default(), 600, &mut events);

        assert_eq!(state.phase, GamePhase::Lost);
        assert!(state.hook.tension <= f32::EPSILON);
        let resolutions: Vec<_> = events
            .iter()
            .filter(|(_, e)| matches!(e, GameEvent::SessionOver { .. }))
            .collect();
        assert_eq!(resolutions.len(), 1);
        assert!(matches!(
            resolutions[0].1,
            GameEvent::SessionOver {
                outcome: Outcome::Loss(LossReason::HookedAway)
            }
        ));
        assert!(!events.iter().any(|(_, e)| matches!(e, GameEvent::BreakFree { .. })));
    }

    #[test]
    fn test_wiggling_free_steps_difficulty_and_starts_cooldown() {
        let mut state = GameState::new(12, quiet_tuning());
        let player_pos = state.player.pos;
        let claw_id = place_claw(&mut state, player_pos, 150.0);

        let wiggle = TickInput {
            drag_delta: 20.0,
            dragging: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        run_ticks(&mut state, &wiggle, 120, &mut events);

        assert!(events.iter().any(|(_, e)| matches!(
            e,
            GameEvent::BreakFree { difficulty } if (*difficulty - 1.25).abs() < 1e-6
        )));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.hook.difficulty, 1.25);
        assert_eq!(state.player.pos.y, PLAYER_BASELINE_Y);
        assert!(state.object(claw_id).is_none());
        assert!(state.hook.blocks_spawn());
        assert!(!events
            .iter()
            .any(|(_, e)| matches!(e, GameEvent::SessionOver { .. })));
    }

    #[test]
    fn test_escape_threshold_rises_after_each_escape() {
        let state = GameState::new(1, quiet_tuning());
        let t1 = state.tuning.tension_threshold(1.0);
        let t2 = state.tuning.tension_threshold(1.25);
        assert!(t2 > t1);
    }

    #[test]
    fn test_tension_decays_without_wiggle_and_grows_with_it() {
        let mut state = GameState::new(13, quiet_tuning());
        let player_pos = state.player.pos;
        place_claw(&mut state, player_pos, 150.0);

        let physics = AabbPhysics;
        let wiggle = TickInput {
            drag_delta: 8.0,
            dragging: true,
            ..Default::default()
        };
        // Attach, then build some tension
        for _ in 0..20 {
            tick(&mut state, &wiggle, &physics, SIM_DT);
        }
        let built = state.hook.tension;
        assert!(built > 0.0);

        // No input: strictly decreasing toward zero
        let idle = TickInput::default();
        let mut last = built;
        for _ in 0..10 {
            tick(&mut state, &idle, &physics, SIM_DT);
            assert!(state.hook.tension < last || state.hook.tension == 0.0);
            last = state.hook.tension;
        }
    }

    #[test]
    fn test_wildcard_window_zaps_then_burns_out() {
        let mut tuning = quiet_tuning();
        tuning.hunger_decay_rate = 0.0;
        let mut state = GameState::new(14, tuning);

        stack::append(&mut state, ItemKind::Berry, false);
        stack::append(&mut state, ItemKind::Star, true);
        assert!(state.stack.active_wild().is_some());
        state.drain_events();

        let window_ticks = crate::secs_to_ticks(state.tuning.wild_window_secs);
        let mut events = Vec::new();
        run_ticks(
            &mut state,
            &TickInput::default(),
            window_ticks + 10,
            &mut events,
        );

        // A neighbor died strictly inside the window
        let first_zap = events
            .iter()
            .find(|(_, e)| matches!(e, GameEvent::SlotZapped { .. }))
            .expect("at least one zap");
        assert!(first_zap.0 < window_ticks);

        // The wildcard destroyed itself at expiry
        assert!(state.stack.slots().iter().all(|s| !s.is_wild));
        assert_eq!(state.stack.active_wild(), None);
        assert!(state.stack.is_empty());
    }

    #[test]
    fn test_starvation_fires_one_loss_after_exactly_ten_decays() {
        let tuning = Tuning {
            spawn_interval_secs: 100_000.0,
            start_hunger: 50.0,
            hunger_decay_rate: 5.0,
            hunger_decay_interval_secs: 1.0,
            ..Default::default()
        };
        let mut state = GameState::new(15, tuning);

        let mut events = Vec::new();
        // 9 decay events: still alive
        run_ticks(&mut state, &TickInput::default(), crate::secs_to_ticks(9.5), &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.hunger > 0.0);

        // The 10th empties the gauge
        run_ticks(&mut state, &TickInput::default(), crate::secs_to_ticks(5.0), &mut events);
        assert_eq!(state.hunger, 0.0);
        let losses: Vec<_> = events
            .iter()
            .filter(|(_, e)| matches!(e, GameEvent::SessionOver { .. }))
            .collect();
        assert_eq!(losses.len(), 1);
        assert!(matches!(
            losses[0].1,
            GameEvent::SessionOver {
                outcome: Outcome::Loss(LossReason::Starved)
            }
        ));
    }

    #[test]
    fn test_at_most_one_claw_live_over_a_long_session() {
        let mut state = GameState::new(16, Tuning::default());
        let physics = AabbPhysics;
        for _ in 0..3600 {
            tick(&mut state, &TickInput::default(), &physics, SIM_DT);
            let live = state.objects.iter().filter(|o| o.is_hook).count();
            assert!(live <= 1);
            if live == 1 {
                assert!(state.hook.is_live());
            }
        }
    }

    #[test]
    fn test_collection_feeds_score_hunger_stamina_and_stack() {
        let mut state = GameState::new(17, quiet_tuning());
        state.stamina = 40.0;
        let id = state.next_entity_id();
        state.objects.push(FallingObject {
            id,
            kind: ItemKind::Cake,
            value: 15,
            pos: state.player.pos,
            vel: Vec2::new(0.0, 150.0),
            is_hook: false,
            is_wild: false,
        });

        let physics = AabbPhysics;
        tick(&mut state, &TickInput::default(), &physics, SIM_DT);

        assert_eq!(state.score, 15);
        assert_eq!(state.hunger, 65.0);
        assert_eq!(state.stamina, 55.0);
        assert_eq!(state.stack.len(), 1);
        assert!(state.object(id).is_none());
    }

    #[test]
    fn test_pause_freezes_the_session() {
        let mut state = GameState::new(18, Tuning::default());
        let physics = AabbPhysics;
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, &physics, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let before = state.time_ticks;
        tick(&mut state, &TickInput::default(), &physics, SIM_DT);
        assert_eq!(state.time_ticks, before);

        tick(&mut state, &pause, &physics, SIM_DT);
        tick(&mut state, &TickInput::default(), &physics, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, before + 2);
    }

    #[test]
    fn test_same_seed_and_script_reproduce_the_session() {
        let mut a = GameState::new(424_242, Tuning::default());
        let mut b = GameState::new(424_242, Tuning::default());
        let physics = AabbPhysics;

        for i in 0..1200u64 {
            let input = TickInput {
                move_dir: if (i / 60) % 2 == 0 { 1.0 } else { -1.0 },
                ..Default::default()
            };
            tick(&mut a, &input, &physics, SIM_DT);
            tick(&mut b, &input, &physics, SIM_DT);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.hunger, b.hunger);
        assert_eq!(a.objects.len(), b.objects.len());
        assert_eq!(a.stack.len(), b.stack.len());
        for (x, y) in a.objects.iter().zip(&b.objects) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.pos, y.pos);
        }
    }
}
