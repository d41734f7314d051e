/// Opaque handle to a loaded frame image, issued by the `SpriteRegistry`.
/// The renderer maps it back to a texture; the core never dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteHandle(pub u32);

impl SpriteHandle {
    /// Value written to render buffers when no sprite is available.
    pub const PLACEHOLDER: f32 = -1.0;

    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

/// Float encoding of an optional sprite for render buffers.
pub fn sprite_slot(sprite: Option<SpriteHandle>) -> f32 {
    sprite.map_or(SpriteHandle::PLACEHOLDER, SpriteHandle::as_f32)
}
