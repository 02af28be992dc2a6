//! Clawfall entry point
//!
//! Headless harness: runs one autopiloted session at a fixed timestep,
//! draining events and logging the HUD once per second. A real embedding
//! would swap the autopilot for the input host and hand each tick's
//! `ViewFrame` to its renderer.

use std::path::Path;

use clawfall::Tuning;
use clawfall::consts::SIM_DT;
use clawfall::platform::AabbPhysics;
use clawfall::sim::{GameEvent, GamePhase, GameState, HookPhase, TickInput, frame, tick};

/// Plain session driver: init is construction, teardown is drop
struct Session {
    state: GameState,
    input: TickInput,
    physics: AabbPhysics,
}

impl Session {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            input: TickInput::default(),
            physics: AabbPhysics,
        }
    }

    /// Autopilot: chase the nearest worthwhile snack; wiggle hard when grabbed
    fn drive(&mut self) {
        if self.state.hook.phase == HookPhase::Attached {
            self.input = TickInput {
                drag_delta: 24.0,
                dragging: true,
                ..Default::default()
            };
            return;
        }

        let player = self.state.player.pos;
        let target = self
            .state
            .objects
            .iter()
            .filter(|o| !o.is_hook && o.value > 0)
            .min_by(|a, b| {
                let da = (a.pos - player).length_squared();
                let db = (b.pos - player).length_squared();
                da.total_cmp(&db)
            })
            .map(|o| o.pos.x);
        self.input = TickInput {
            target_x: target,
            ..Default::default()
        };
    }

    fn tick(&mut self) -> Vec<GameEvent> {
        self.drive();
        tick(&mut self.state, &self.input, &self.physics, SIM_DT);
        self.state.drain_events()
    }

    fn resolved(&self) -> bool {
        matches!(self.state.phase, GamePhase::Won | GamePhase::Lost)
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let tuning = args
        .next()
        .map(|p| Tuning::load_or_default(Path::new(&p)))
        .unwrap_or_default();

    log::info!("Clawfall (headless) starting, seed {seed}");

    let mut session = Session::new(seed, tuning);
    let max_ticks = 10 * 60 * 60; // ten minutes of play, tops

    for t in 0..max_ticks {
        for event in session.tick() {
            log::info!("event: {event:?}");
        }

        if t % 60 == 0 {
            let hud = frame(&session.state);
            log::info!(
                "score={} hunger={:.0}% stamina={:.0} stack={} tension={:.2}",
                hud.score,
                hud.hunger,
                hud.stamina,
                hud.slots.len(),
                hud.tension_fill,
            );
        }

        if session.resolved() {
            break;
        }
    }

    println!("session over: {:?}", session.state.phase);
}
