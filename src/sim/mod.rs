//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies; collision geometry and drawing
//!   belong to the host collaborators

pub mod hook;
pub mod spawn;
pub mod stack;
pub mod state;
pub mod tick;
pub mod timers;
pub mod view;

pub use hook::{HookPhase, HookState};
pub use spawn::{CATALOG, CatalogEntry};
pub use stack::{SnackStack, Slot};
pub use state::{
    Bounds, FallingObject, GameEvent, GamePhase, GameState, ItemKind, LossReason, Outcome,
    PhysicsHost, Player,
};
pub use tick::{TickInput, tick};
pub use view::{ViewFrame, frame};
