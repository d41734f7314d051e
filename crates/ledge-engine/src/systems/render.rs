use crate::components::sprite::{sprite_slot, SpriteHandle};
use crate::core::scene::Scene;
use crate::renderer::instance::{InstanceKind, RenderBuffer, RenderInstance};

/// Rebuild the render buffer from the scene.
///
/// Draw order is platforms, ladders, NPCs, enemies, then the player on top.
/// Inactive NPCs are skipped, and so is the player during the hidden half
/// of the post-hit blink.
pub fn build_render_buffer(scene: &Scene, buffer: &mut RenderBuffer) {
    buffer.clear();

    for platform in &scene.platforms {
        buffer.push(RenderInstance::new(
            InstanceKind::Platform,
            platform.rect,
            SpriteHandle::PLACEHOLDER,
        ));
    }
    for ladder in &scene.ladders {
        buffer.push(RenderInstance::new(
            InstanceKind::Ladder,
            ladder.rect,
            SpriteHandle::PLACEHOLDER,
        ));
    }

    for npc in scene.npcs.iter().filter(|n| n.active) {
        buffer.push(
            RenderInstance::new(
                InstanceKind::Npc,
                npc.bounds(),
                sprite_slot(npc.animation.current_sprite()),
            )
            .flipped(npc.kin.facing.is_left()),
        );
    }

    for enemy in &scene.enemies {
        buffer.push(
            RenderInstance::new(
                InstanceKind::Enemy,
                enemy.bounds(),
                sprite_slot(enemy.animation.current_sprite()),
            )
            .flipped(enemy.kin.facing.is_left()),
        );
    }

    let player = &scene.player;
    if player.is_visible() {
        buffer.push(
            RenderInstance::new(
                InstanceKind::Player,
                player.bounds(),
                sprite_slot(player.animation.current_sprite()),
            )
            .flipped(player.kin.facing.is_left()),
        );
    }
}
