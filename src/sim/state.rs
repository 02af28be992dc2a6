//! Game state and core simulation types
//!
//! Everything the session owns lives here; all of it is transient and dies
//! with the session.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::hook::HookState;
use super::stack::SnackStack;
use super::timers::{TimerKind, TimerQueue};
use crate::consts::*;
use crate::tuning::Tuning;

/// Catalog types for falling objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Berry,
    Bread,
    Cake,
    Cheese,
    Fish,
    /// The claw - grabs the player instead of being collected
    Claw,
    /// Spoiled food, negative value
    Mold,
    /// Wildcard - a run of these clears the board; carries a destructive timer
    Star,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Berry => "berry",
            ItemKind::Bread => "bread",
            ItemKind::Cake => "cake",
            ItemKind::Cheese => "cheese",
            ItemKind::Fish => "fish",
            ItemKind::Claw => "claw",
            ItemKind::Mold => "mold",
            ItemKind::Star => "star",
        }
    }
}

/// Axis-aligned bounds handed to the physics collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec2,
    pub half: Vec2,
}

impl Bounds {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self {
            center,
            half: Vec2::splat(size / 2.0),
        }
    }
}

/// Physics collaborator seam: overlap queries and velocity integration.
/// The sim never implements collision geometry itself.
pub trait PhysicsHost {
    fn overlap(&self, a: &Bounds, b: &Bounds) -> bool;
    fn integrate(&self, pos: &mut Vec2, vel: Vec2, dt: f32);
}

/// A falling object entity
#[derive(Debug, Clone)]
pub struct FallingObject {
    pub id: u32,
    pub kind: ItemKind,
    /// Signed point value applied on collection
    pub value: i32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub is_hook: bool,
    pub is_wild: bool,
}

impl FallingObject {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, OBJECT_SIZE)
    }
}

/// The player's catcher
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, PLAYER_BASELINE_Y),
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, PLAYER_HITBOX)
    }

    /// Clamp x so the sprite stays on the field
    pub fn clamp_x(x: f32) -> f32 {
        x.clamp(PLAYER_SIZE / 2.0, FIELD_WIDTH - PLAYER_SIZE / 2.0)
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Session is paused
    Paused,
    /// Session resolved in the player's favor
    Won,
    /// Session resolved against the player
    Lost,
}

/// Why the session was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    /// The claw pulled the player off the top of the field
    HookedAway,
    /// Hunger drained to zero
    Starved,
    /// A collected item would not fit on the stack
    StackOverflow,
    /// Stamina ran out while grabbed
    Exhausted,
}

/// Session resolution, emitted exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss(LossReason),
}

/// Events drained by the scene/audio/particle hosts each tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A non-claw object landed in the catcher
    Collected { kind: ItemKind, value: i32 },
    /// A claw entered the field
    HookArmed,
    /// The claw grabbed the player
    HookAttached,
    /// The player wiggled free; threshold multiplier after the escape
    BreakFree { difficulty: f32 },
    /// A run of matching slots was removed
    RunCleared { kind: ItemKind, len: usize },
    /// A wildcard run wiped the whole stack
    StackCleared,
    /// A wildcard destroyed a neighbor slot
    SlotZapped { kind: ItemKind },
    /// Session resolved; the scene host owns what happens next
    SessionOver { outcome: Outcome },
}

/// Complete session state (deterministic for a given seed + input script)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; every draw goes through here
    pub rng: Pcg32,
    /// Balance knobs, fixed for the session
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    /// Live falling objects (sorted by id for determinism)
    pub objects: Vec<FallingObject>,
    /// Claw lifecycle state
    pub hook: HookState,
    /// Collection stack
    pub stack: SnackStack,
    pub score: i64,
    /// Hunger gauge, 0..=100
    pub hunger: f32,
    pub stamina: f32,
    /// Camera shake magnitude for the renderer, decays every tick
    pub shake: f32,
    /// Due-tick event queue (spawn cadence, hunger decay, wild timers)
    pub timers: TimerQueue,
    /// Events pending pickup by the host
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session with the given seed and balance
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut timers = TimerQueue::new();
        timers.schedule(tuning.spawn_interval_ticks(), TimerKind::Spawn);
        timers.schedule(tuning.hunger_interval_ticks(), TimerKind::HungerDecay);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            player: Player::default(),
            objects: Vec::new(),
            hook: HookState::default(),
            stack: SnackStack::new(tuning.max_stack_height),
            score: 0,
            hunger: tuning.start_hunger.clamp(0.0, HUNGER_MAX),
            stamina: tuning.start_stamina.clamp(0.0, tuning.max_stamina),
            shake: 0.0,
            timers,
            events: Vec::new(),
            tuning,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn object(&self, id: u32) -> Option<&FallingObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: u32) -> Option<&mut FallingObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Remove an object outright (collection, claw resolution, despawn)
    pub fn destroy_object(&mut self, id: u32) {
        self.objects.retain(|o| o.id != id);
    }

    /// Ensure objects are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.objects.sort_by_key(|o| o.id);
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resolve the session in the player's favor. No-op unless Playing.
    pub fn resolve_win(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Won;
        log::info!("session won: score={} hunger={}", self.score, self.hunger);
        self.events.push(GameEvent::SessionOver {
            outcome: Outcome::Win,
        });
    }

    /// Resolve the session against the player. No-op unless Playing.
    pub fn resolve_loss(&mut self, reason: LossReason) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Lost;
        log::info!("session lost: {reason:?} at tick {}", self.time_ticks);
        self.events.push(GameEvent::SessionOver {
            outcome: Outcome::Loss(reason),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_fires_once() {
        let mut state = GameState::new(7, Tuning::default());
        state.resolve_loss(LossReason::Starved);
        state.resolve_loss(LossReason::Starved);
        state.resolve_win();

        let events = state.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            GameEvent::SessionOver {
                outcome: Outcome::Loss(LossReason::Starved)
            }
        );
        assert_eq!(state.phase, GamePhase::Lost);
    }

    #[test]
    fn test_entity_ids_are_unique_and_ordered() {
        let mut state = GameState::new(1, Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_player_x_clamps_to_field() {
        assert_eq!(Player::clamp_x(-100.0), PLAYER_SIZE / 2.0);
        assert_eq!(Player::clamp_x(10_000.0), FIELD_WIDTH - PLAYER_SIZE / 2.0);
    }
}
