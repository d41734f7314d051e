//! Position, velocity and contact state shared by every moving entity.
//!
//! Velocity has split authority. Entities own horizontal intent (input,
//! patrol) and may issue vertical impulses (jump, ladder climb). The physics
//! engine owns the rest of the vertical axis: gravity, ground snapping and
//! collision response. The two sides go through separate mutators so neither
//! can silently overwrite the other's axis.

use glam::Vec2;

use crate::core::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn is_left(self) -> bool {
        self == Facing::Left
    }

    /// +1.0 for right, -1.0 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Vertical contact state, re-derived by the physics engine every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundState {
    OnGround,
    #[default]
    Airborne,
    OnLadder,
}

#[derive(Debug, Clone, Default)]
pub struct Kinematics {
    /// Top-left of the rendered bounds, world space.
    pub position: Vec2,
    velocity: Vec2,
    pub facing: Facing,
    ground: GroundState,
    impulse: bool,
}

impl Kinematics {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn ground(&self) -> GroundState {
        self.ground
    }

    pub fn is_grounded(&self) -> bool {
        self.ground == GroundState::OnGround
    }

    /// Whether the entity issued a vertical impulse since the last physics step.
    pub fn impulse_pending(&self) -> bool {
        self.impulse
    }

    // -- Entity-authored --

    /// Set horizontal intent (input or patrol speed).
    pub fn drive_horizontal(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    /// Set vertical velocity directly: a jump impulse or a ladder climb speed.
    /// The next physics step preserves an upward impulse even if the body is
    /// still touching the ground.
    pub fn impulse_vertical(&mut self, vy: f32) {
        self.velocity.y = vy;
        self.impulse = true;
    }

    /// Entity-side ground transitions (jump take-off, ladder grab/release).
    pub fn set_ground(&mut self, ground: GroundState) {
        self.ground = ground;
    }

    pub fn face(&mut self, facing: Facing) {
        self.facing = facing;
    }

    // -- Engine-authored --

    pub(crate) fn resolve_vertical(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    /// Landing friction: the one place the engine touches horizontal velocity.
    pub(crate) fn damp_horizontal(&mut self, factor: f32) {
        self.velocity.x *= factor;
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub(crate) fn end_step(&mut self) {
        self.impulse = false;
    }

    /// Rendered bounds for the given sprite size.
    pub fn bounds(&self, size: Vec2) -> Rect {
        Rect::from_pos_size(self.position, size)
    }
}
