use bytemuck::{Pod, Zeroable};

use crate::core::rect::Rect;

/// What an instance depicts, so the host can pick a fallback color or layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum InstanceKind {
    Platform = 0,
    Ladder = 1,
    Player = 2,
    Enemy = 3,
    Npc = 4,
}

/// Per-instance render data handed to the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Top-left x in world space.
    pub x: f32,
    /// Top-left y in world space (Y down).
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Sprite handle, or -1.0 to draw a placeholder rectangle.
    pub sprite: f32,
    /// 1.0 to mirror horizontally.
    pub facing_left: f32,
    /// `InstanceKind` as a float.
    pub kind: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(kind: InstanceKind, rect: Rect, sprite: f32) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            sprite,
            facing_left: 0.0,
            kind: kind as u32 as f32,
            alpha: 1.0,
        }
    }

    pub fn flipped(mut self, facing_left: bool) -> Self {
        self.facing_left = if facing_left { 1.0 } else { 0.0 };
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Instances for one frame, in draw order (back to front).
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for zero-copy reads from the host.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
