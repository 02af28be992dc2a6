//! Host collaborator glue
//!
//! The simulation declares the seams it needs (see `sim::PhysicsHost`); this
//! module carries the reference implementations the native harness and the
//! test suite run against. A real embedding substitutes its own engine here.

use glam::Vec2;

use crate::sim::{Bounds, PhysicsHost};

/// Axis-aligned overlap plus forward-Euler integration
#[derive(Debug, Clone, Copy, Default)]
pub struct AabbPhysics;

impl PhysicsHost for AabbPhysics {
    fn overlap(&self, a: &Bounds, b: &Bounds) -> bool {
        let d = (a.center - b.center).abs();
        let reach = a.half + b.half;
        d.x < reach.x && d.y < reach.y
    }

    fn integrate(&self, pos: &mut Vec2, vel: Vec2, dt: f32) {
        *pos += vel * dt;
    }
}
