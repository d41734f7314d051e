use crate::api::config::BodyShape;
use crate::core::rect::Rect;

/// Which roster a physics component mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Player,
    Enemy,
    Npc,
    Platform,
}

/// Collision box and material for one entity or platform.
///
/// Dynamic components are keyed by `EntityId` in the engine's table; the box
/// is re-derived from the owner's bounds every frame and is never carried
/// across frames as truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsComponent {
    pub kind: BodyKind,
    pub collision_box: Rect,
    pub has_gravity: bool,
    /// Static bodies are never pushed sideways by the engine.
    pub is_static: bool,
    /// Restitution on ceiling hits, in [0, 1].
    pub bounce_factor: f32,
    /// Horizontal damping applied to bodies landing on this one, in [0, 1].
    pub friction: f32,
}

impl PhysicsComponent {
    /// Component for a moving entity. NPCs are static: they only settle vertically.
    pub fn dynamic(kind: BodyKind, bounds: Rect, shape: &BodyShape) -> Self {
        Self {
            kind,
            collision_box: shape.collision_box(bounds),
            has_gravity: true,
            is_static: kind == BodyKind::Npc,
            bounce_factor: shape.bounce_factor,
            friction: 0.0,
        }
    }

    pub fn platform(rect: Rect, friction: f32) -> Self {
        Self {
            kind: BodyKind::Platform,
            collision_box: rect,
            has_gravity: false,
            is_static: true,
            bounce_factor: 0.0,
            friction,
        }
    }
}
