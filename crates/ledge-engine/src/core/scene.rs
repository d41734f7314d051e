use glam::Vec2;

use crate::api::config::PhysicsConfig;
use crate::api::types::{EntityId, IdAllocator};
use crate::components::animation::Animation;
use crate::components::behavior::BehaviorState;
use crate::entities::enemy::Enemy;
use crate::entities::npc::NpcRoster;
use crate::entities::player::Player;
use crate::level::{Ladder, LevelDesc, Platform};

/// Live roster for one level: the player, enemies, NPCs and the static
/// geometry they move through.
/// Designed for small rosters (tens of entities, not thousands).
pub struct Scene {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub npcs: NpcRoster,
    pub platforms: Vec<Platform>,
    pub ladders: Vec<Ladder>,
    /// Horizontal extent of the level.
    pub width: f32,
    pub player_spawn: Vec2,
    /// Animation set given to every enemy spawned from now on.
    pub enemy_animation: Animation,
    /// Animation set given to every NPC spawned from now on.
    pub npc_animation: Animation,
    ids: IdAllocator,
}

impl Scene {
    /// Build the roster described by `level`. Enemies without their own
    /// speed use `physics.enemy_speed`.
    pub fn from_level(level: &LevelDesc, physics: &PhysicsConfig) -> Self {
        let mut ids = IdAllocator::new();
        let player = Player::new(ids.next_id(), level.player_spawn);

        let mut scene = Self {
            player,
            enemies: Vec::with_capacity(level.enemies.len()),
            npcs: NpcRoster::new(),
            platforms: level.platforms.clone(),
            ladders: level.ladders.clone(),
            width: level.width,
            player_spawn: level.player_spawn,
            enemy_animation: Animation::default(),
            npc_animation: Animation::default(),
            ids,
        };
        for spawn in &level.enemies {
            scene.spawn_enemy(
                Vec2::new(spawn.x, spawn.y),
                spawn.patrol_width,
                spawn.speed.unwrap_or(physics.enemy_speed),
            );
        }
        for spawn in &level.npcs {
            scene.spawn_npc(&spawn.name, spawn.x, spawn.y);
        }
        log::info!(
            "scene built: {} platforms, {} ladders, {} enemies, {} npcs",
            scene.platforms.len(),
            scene.ladders.len(),
            scene.enemies.len(),
            scene.npcs.len()
        );
        scene
    }

    pub fn spawn_enemy(&mut self, position: Vec2, patrol_width: f32, speed: f32) -> EntityId {
        let id = self.ids.next_id();
        let mut enemy = Enemy::new(id, position, patrol_width, speed);
        enemy.animation = self.enemy_animation.clone();
        self.enemies.push(enemy);
        id
    }

    /// Remove an enemy by ID. Returns the removed enemy if found.
    pub fn despawn_enemy(&mut self, id: EntityId) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(idx))
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn spawn_npc(&mut self, name: &str, x: f32, y: f32) -> EntityId {
        let id = self.npcs.add(&mut self.ids, name, x, y);
        if let Some(npc) = self.npcs.get_mut(id) {
            npc.animation = self.npc_animation.clone();
        }
        id
    }

    /// Take over the animation sets loaded into `previous`, restarted at Idle.
    /// Used when a level is rebuilt so loaded frames survive a reset.
    pub fn inherit_animations(&mut self, previous: &Scene) {
        self.enemy_animation = previous.enemy_animation.clone();
        self.npc_animation = previous.npc_animation.clone();

        self.player.animation = previous.player.animation.clone();
        restart_idle(&mut self.player.animation);
        for enemy in &mut self.enemies {
            enemy.animation = self.enemy_animation.clone();
        }
        for npc in self.npcs.iter_mut() {
            npc.animation = self.npc_animation.clone();
        }
    }
}

fn restart_idle(animation: &mut Animation) {
    animation.set_state(BehaviorState::Idle);
    animation.reset();
}
