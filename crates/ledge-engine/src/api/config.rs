//! Engine and physics tunables.
//!
//! Every field has a default; JSON overrides may be partial.

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;

/// Game-level configuration: world dimensions, timing and gameplay rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Upper bound applied to the delta time of a physics step.
    /// `None` leaves large deltas unguarded, which can tunnel through thin platforms.
    pub max_step_dt: Option<f32>,
    /// Visible width in world units.
    pub window_width: f32,
    /// Visible height in world units.
    pub window_height: f32,
    /// Thickness of the floor band at the bottom of the window.
    /// The ground line sits at `window_height - ground_height`.
    pub ground_height: f32,
    /// Seconds of invulnerability after the player is hit.
    pub hit_cooldown: f32,
    /// Horizontal displacement applied to the player when hit.
    pub knockback_x: f32,
    /// Upward displacement applied to the player when hit.
    pub knockback_y: f32,
    /// Maximum distance between player and NPC centers for an interaction.
    pub interact_range: f32,
    /// Camera follow smoothing (0.0 = snap).
    pub camera_smoothing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_step_dt: None,
            window_width: 800.0,
            window_height: 600.0,
            ground_height: 40.0,
            hit_cooldown: 1.5,
            knockback_x: 50.0,
            knockback_y: 30.0,
            interact_range: 60.0,
            camera_smoothing: 0.0,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Y coordinate of the global floor.
    pub fn ground_line(&self) -> f32 {
        self.window_height - self.ground_height
    }

    pub fn world_bounds(&self) -> WorldBounds {
        WorldBounds {
            min_x: 0.0,
            ground_line: self.ground_line(),
        }
    }
}

/// World limits the physics engine enforces on every dynamic body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Bodies never move left of this x.
    pub min_x: f32,
    /// Global floor; bodies found below it are lifted back on top.
    pub ground_line: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        GameConfig::default().world_bounds()
    }
}

/// How a body's collision box is derived from its rendered bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyShape {
    /// Collision width as a fraction of the bounds width.
    pub width_ratio: f32,
    /// Collision height as a fraction of the bounds height.
    pub height_ratio: f32,
    /// Left offset as a fraction of the bounds width.
    pub offset_x_ratio: f32,
    /// Top offset as a fraction of the bounds height.
    pub offset_y_ratio: f32,
    /// Restitution on ceiling hits, in [0, 1].
    pub bounce_factor: f32,
}

impl Default for BodyShape {
    fn default() -> Self {
        Self {
            width_ratio: 1.0,
            height_ratio: 1.0,
            offset_x_ratio: 0.0,
            offset_y_ratio: 0.0,
            bounce_factor: 0.0,
        }
    }
}

impl BodyShape {
    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce_factor = bounce;
        self
    }

    /// Collision box for the given rendered bounds.
    pub fn collision_box(&self, bounds: Rect) -> Rect {
        Rect::new(
            bounds.x + bounds.w * self.offset_x_ratio,
            bounds.y + bounds.h * self.offset_y_ratio,
            bounds.w * self.width_ratio,
            bounds.h * self.height_ratio,
        )
    }
}

/// Physics tunables. Velocities are px/s, accelerations px/s².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Maximum downward speed.
    pub terminal_velocity: f32,
    /// Vertical velocity set by a jump. Negative is upward.
    pub jump_force: f32,
    pub player_max_speed: f32,
    /// Horizontal acceleration toward the input target speed. `<= 0` snaps instantly.
    pub player_acceleration: f32,
    pub climb_speed: f32,
    pub enemy_speed: f32,
    /// Horizontal damping factor applied on landing, in [0, 1].
    pub platform_friction: f32,
    /// When set, platforms do not stop bodies moving up through them.
    pub one_way_platforms: bool,
    pub player: BodyShape,
    pub enemy: BodyShape,
    pub npc: BodyShape,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 2160.0,
            terminal_velocity: 600.0,
            jump_force: -900.0,
            player_max_speed: 300.0,
            player_acceleration: 2400.0,
            climb_speed: 180.0,
            enemy_speed: 120.0,
            platform_friction: 0.3,
            one_way_platforms: false,
            player: BodyShape::default(),
            enemy: BodyShape::default().with_bounce(0.1),
            npc: BodyShape::default(),
        }
    }
}

impl PhysicsConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clamp unit-interval factors into [0, 1], logging any correction.
    pub fn sanitized(mut self) -> Self {
        self.platform_friction = clamp_unit("platform_friction", self.platform_friction);
        for (name, shape) in [
            ("player", &mut self.player),
            ("enemy", &mut self.enemy),
            ("npc", &mut self.npc),
        ] {
            shape.bounce_factor = clamp_unit(name, shape.bounce_factor);
        }
        self
    }
}

fn clamp_unit(name: &str, value: f32) -> f32 {
    let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    if clamped != value {
        log::warn!("{name}: {value} outside [0, 1], clamped to {clamped}");
    }
    clamped
}
