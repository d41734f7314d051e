//! Animation system: advances every entity's animation clock.

use crate::core::scene::Scene;

/// Tick the player, enemy and active NPC animations.
///
/// Call once per step after behaviors have been derived, so a state change
/// made this step starts from frame 0.
pub fn tick_animations(scene: &mut Scene, dt: f32) {
    scene.player.animation.update(dt);
    for enemy in &mut scene.enemies {
        enemy.animation.update(dt);
    }
    for npc in scene.npcs.iter_mut().filter(|n| n.active) {
        npc.animation.update(dt);
    }
}
