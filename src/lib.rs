//! Clawfall - an arcade catch-'em-all with a claw hazard
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, claw state machine, snack stack, session bookkeeping)
//! - `platform`: Host collaborator glue for the native harness
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz arcade cadence)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player sprite footprint and collision box
    pub const PLAYER_SIZE: f32 = 120.0;
    pub const PLAYER_HITBOX: f32 = 60.0;
    /// Resting vertical position of the player (85% down the field)
    pub const PLAYER_BASELINE_Y: f32 = FIELD_HEIGHT * 0.85;

    /// Falling object footprint
    pub const OBJECT_SIZE: f32 = 56.0;
    /// Objects enter just above the top edge
    pub const SPAWN_Y: f32 = -(OBJECT_SIZE / 2.0);
    /// Objects below this line are gone for good
    pub const DESPAWN_Y: f32 = FIELD_HEIGHT + OBJECT_SIZE / 2.0;

    /// Stack display column (left gutter), bottom slot anchor, per-slot rise
    pub const STACK_X: f32 = 40.0;
    pub const STACK_BASE_Y: f32 = FIELD_HEIGHT - 48.0;
    pub const STACK_STEP: f32 = 44.0;

    /// Hunger gauge bounds
    pub const HUNGER_MAX: f32 = 100.0;
}

/// Convert a duration in seconds to whole simulation ticks (rounded up)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    (secs / consts::SIM_DT).ceil() as u64
}
