//! Declarative render state
//!
//! Built fresh each tick and handed to the rendering collaborator, which
//! owns all drawing. Nothing here is read back into the simulation.

use glam::Vec2;

use super::hook::HookPhase;
use super::state::{GamePhase, GameState, ItemKind};

/// Rope/tether geometry while a claw is on the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rope {
    /// Top-of-field anchor x recorded at claw spawn
    pub anchor_x: f32,
    /// Claw end of the rope
    pub claw_pos: Vec2,
}

/// One stack slot as the renderer should draw it
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub kind: ItemKind,
    pub is_wild: bool,
    pub pos: Vec2,
}

/// One falling object sprite
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectView {
    pub kind: ItemKind,
    pub pos: Vec2,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFrame {
    pub phase: GamePhase,
    pub player_pos: Vec2,
    pub objects: Vec<ObjectView>,
    pub rope: Option<Rope>,
    /// Tension bar fill, 0..=1 against the current escape threshold
    pub tension_fill: f32,
    pub slots: Vec<SlotView>,
    pub score: i64,
    pub hunger: f32,
    pub stamina: f32,
    /// Camera shake magnitude, 0..=1
    pub shake: f32,
}

/// Snapshot the session for the renderer
pub fn frame(state: &GameState) -> ViewFrame {
    let rope = state
        .hook
        .object_id
        .and_then(|id| state.object(id))
        .map(|claw| Rope {
            anchor_x: state.hook.anchor_x,
            claw_pos: claw.pos,
        });

    let threshold = state.tuning.tension_threshold(state.hook.difficulty);
    let tension_fill = if state.hook.phase == HookPhase::Attached && threshold > 0.0 {
        (state.hook.tension / threshold).clamp(0.0, 1.0)
    } else {
        0.0
    };

    ViewFrame {
        phase: state.phase,
        player_pos: state.player.pos,
        objects: state
            .objects
            .iter()
            .map(|o| ObjectView {
                kind: o.kind,
                pos: o.pos,
            })
            .collect(),
        rope,
        tension_fill,
        slots: state
            .stack
            .slots()
            .iter()
            .map(|s| SlotView {
                kind: s.kind,
                is_wild: s.is_wild,
                pos: s.target_pos,
            })
            .collect(),
        score: state.score,
        hunger: state.hunger,
        stamina: state.stamina,
        shake: state.shake,
    }
}
