//! Falling object spawner
//!
//! Draws from a fixed weighted catalog on a timer. The claw is part of the
//! same catalog, but only one claw may be live (or cooling down) at a time;
//! a blocked claw draw is redirected to a fixed fallback entry rather than
//! re-rolled.

use glam::Vec2;
use rand::Rng;

use super::state::{FallingObject, GameEvent, GameState, ItemKind};
use crate::consts::*;

/// One weighted draw-table entry
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub kind: ItemKind,
    pub value: i32,
    pub weight: u32,
    pub is_hook: bool,
    pub is_wild: bool,
}

const fn food(kind: ItemKind, value: i32, weight: u32) -> CatalogEntry {
    CatalogEntry {
        kind,
        value,
        weight,
        is_hook: false,
        is_wild: false,
    }
}

/// The fixed catalog. Foods dominate; the claw and the star are rare.
pub static CATALOG: [CatalogEntry; 8] = [
    food(ItemKind::Berry, 1, 20),
    food(ItemKind::Bread, 10, 15),
    food(ItemKind::Cake, 15, 10),
    food(ItemKind::Cheese, 5, 15),
    food(ItemKind::Fish, 5, 15),
    CatalogEntry {
        kind: ItemKind::Claw,
        value: 5,
        weight: 8,
        is_hook: true,
        is_wild: false,
    },
    food(ItemKind::Mold, -5, 12),
    CatalogEntry {
        kind: ItemKind::Star,
        value: 5,
        weight: 5,
        is_hook: false,
        is_wild: true,
    },
];

/// Redirect target when a claw draw is blocked: the first non-claw entry
static FALLBACK: &CatalogEntry = &CATALOG[0];

/// Weighted draw over the injected random source
pub fn draw(rng: &mut impl Rng) -> &'static CatalogEntry {
    let total: u32 = CATALOG.iter().map(|e| e.weight).sum();
    let mut roll = rng.random_range(0..total);
    for entry in &CATALOG {
        if roll < entry.weight {
            return entry;
        }
        roll -= entry.weight;
    }
    FALLBACK
}

/// Manufacture one falling object from the catalog. Arms the claw controller
/// when the draw produces a claw.
pub(crate) fn spawn_falling_object(state: &mut GameState) {
    let mut entry = draw(&mut state.rng);
    if entry.is_hook && state.hook.blocks_spawn() {
        entry = FALLBACK;
    }

    let x = state
        .rng
        .random_range(OBJECT_SIZE / 2.0..=FIELD_WIDTH - OBJECT_SIZE / 2.0);
    let speed = state
        .rng
        .random_range(state.tuning.fall_speed_min..=state.tuning.fall_speed_max);

    let id = state.next_entity_id();
    state.objects.push(FallingObject {
        id,
        kind: entry.kind,
        value: entry.value,
        pos: Vec2::new(x, SPAWN_Y),
        vel: Vec2::new(0.0, speed),
        is_hook: entry.is_hook,
        is_wild: entry.is_wild,
    });

    if entry.is_hook {
        state.hook.arm(id, x);
        state.events.push(GameEvent::HookArmed);
    }
}
