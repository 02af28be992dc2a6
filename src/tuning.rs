//! Data-driven game balance
//!
//! Every gameplay scalar lives here so balance passes never touch sim code.
//! Loaded from JSON when a file is supplied, otherwise defaults apply.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;

/// Gameplay balance knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawning ===
    /// Seconds between catalog draws
    pub spawn_interval_secs: f32,
    /// Fall speed range for spawned objects (px/s)
    pub fall_speed_min: f32,
    pub fall_speed_max: f32,

    // === Player ===
    /// Keyboard movement speed (px/s)
    pub player_speed: f32,

    // === Claw (hook) ===
    /// Upward retract speed once the claw grabs the player (px/s)
    pub retract_speed: f32,
    /// Player hangs this far below the claw while grabbed
    pub attach_offset_y: f32,
    /// Tension gained per pixel of lateral drag while grabbed
    pub wiggle_gain: f32,
    /// Tension lost per second, every tick, wiggling or not
    pub tension_decay_per_sec: f32,
    /// Escape threshold at difficulty 1.0
    pub base_tension_threshold: f32,
    /// Threshold multiplier increase per successful escape
    pub difficulty_step: f32,
    /// Seconds after an escape before the claw can be drawn again
    pub hook_cooldown_secs: f32,
    /// Fraction of the threshold past which the shake cue kicks in
    pub shake_warn_ratio: f32,

    // === Hunger / stamina ===
    pub start_hunger: f32,
    /// Hunger lost per decay event
    pub hunger_decay_rate: f32,
    /// Seconds between decay events
    pub hunger_decay_interval_secs: f32,
    pub max_stamina: f32,
    pub start_stamina: f32,
    /// Stamina drained per second while grabbed, scaled by difficulty
    pub stamina_drain_per_sec: f32,
    /// Minimum stamina granted per collection, whatever the item's value
    pub stamina_refill_min: f32,

    // === Stack ===
    /// Slots the stack can hold; one more is a loss
    pub max_stack_height: usize,
    /// Lifetime of a wildcard's destructive effect (seconds)
    pub wild_window_secs: f32,
    /// Zap cadence bounds within the window (seconds)
    pub wild_zap_min_secs: f32,
    pub wild_zap_max_secs: f32,

    // === Session ===
    pub winning_score: i64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval_secs: 0.333,
            fall_speed_min: 120.0,
            fall_speed_max: 220.0,

            player_speed: 600.0,

            retract_speed: 200.0,
            attach_offset_y: 60.0,
            wiggle_gain: 0.35,
            tension_decay_per_sec: 12.0,
            base_tension_threshold: 100.0,
            difficulty_step: 0.25,
            hook_cooldown_secs: 6.0,
            shake_warn_ratio: 0.75,

            start_hunger: 50.0,
            hunger_decay_rate: 5.0,
            hunger_decay_interval_secs: 1.0,
            max_stamina: 100.0,
            start_stamina: 100.0,
            stamina_drain_per_sec: 4.0,
            stamina_refill_min: 5.0,

            max_stack_height: 8,
            wild_window_secs: 15.0,
            wild_zap_min_secs: 3.0,
            wild_zap_max_secs: 5.0,

            winning_score: 500,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("Bad tuning file {}: {err}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Cannot read tuning {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Current escape threshold for a given difficulty multiplier
    #[inline]
    pub fn tension_threshold(&self, difficulty: f32) -> f32 {
        self.base_tension_threshold * difficulty
    }

    /// Spawn cadence in whole ticks
    pub fn spawn_interval_ticks(&self) -> u64 {
        crate::secs_to_ticks(self.spawn_interval_secs).max(1)
    }

    /// Hunger decay cadence in whole ticks
    pub fn hunger_interval_ticks(&self) -> u64 {
        crate::secs_to_ticks(self.hunger_decay_interval_secs).max(1)
    }

    /// Claw cooldown in whole ticks
    pub fn cooldown_ticks(&self) -> u32 {
        (self.hook_cooldown_secs / SIM_DT).ceil() as u32
    }
}
