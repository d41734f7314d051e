//! Debug rendering: opt-in collider visualization.
//!
//! The host draws each outline as a closed line strip over the scene.

use crate::core::physics::{BodyKind, PhysicsComponent, PhysicsEngine};

/// Closed outline of one collision box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugOutline {
    pub kind: BodyKind,
    pub points: [[f32; 2]; 5],
}

impl DebugOutline {
    fn of(component: &PhysicsComponent) -> Self {
        Self {
            kind: component.kind,
            points: component.collision_box.outline(),
        }
    }

    /// Floats per outline in the host layout.
    pub const FLOATS: usize = 11;

    /// Float layout for the host: kind then ten coordinates.
    pub fn to_floats(&self) -> [f32; Self::FLOATS] {
        let mut out = [0.0; Self::FLOATS];
        out[0] = self.kind as u32 as f32;
        for (i, [x, y]) in self.points.iter().enumerate() {
            out[1 + i * 2] = *x;
            out[2 + i * 2] = *y;
        }
        out
    }
}

/// Outlines for every platform and dynamic body the engine knows about.
///
/// Platforms come first in registration order, then dynamic bodies sorted
/// by entity id, so the output is stable from frame to frame.
pub fn collider_outlines(physics: &PhysicsEngine) -> Vec<DebugOutline> {
    let mut bodies: Vec<_> = physics.dynamic_components().collect();
    bodies.sort_by_key(|(id, _)| **id);

    physics
        .platform_components()
        .iter()
        .map(DebugOutline::of)
        .chain(bodies.into_iter().map(|(_, c)| DebugOutline::of(c)))
        .collect()
}
