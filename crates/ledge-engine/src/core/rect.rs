use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world space (origin top-left, Y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect,
    /// so a body resting exactly on a surface is not in contact with it.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Inclusive horizontal overlap (touching edges count).
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() >= other.left() && self.left() <= other.right()
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.contains_x(p.x) && p.y >= self.top() && p.y <= self.bottom()
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Closed outline: 4 corners plus the first corner again.
    pub fn outline(&self) -> [[f32; 2]; 5] {
        [
            [self.left(), self.top()],
            [self.right(), self.top()],
            [self.right(), self.bottom()],
            [self.left(), self.bottom()],
            [self.left(), self.top()],
        ]
    }
}
