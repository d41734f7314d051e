use glam::Vec2;

use crate::api::config::{GameConfig, PhysicsConfig};
use crate::api::types::{EntityId, EventKind, GameEvent};
use crate::core::physics::PhysicsEngine;
use crate::core::scene::Scene;
use crate::input::queue::{Action, Controls};
use crate::level::LevelDesc;
use crate::renderer::camera::Camera2D;
use crate::systems::animation::tick_animations;

/// Whether the world is running or waiting for a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Playing,
    GameOver,
}

/// One running level: the live scene, the physics engine that moves it and
/// the camera that follows the player.
///
/// `update` is the whole per-step pipeline. It never fails; anything odd is
/// logged and the step carries on.
pub struct Game {
    config: GameConfig,
    level: LevelDesc,
    scene: Scene,
    physics: PhysicsEngine,
    camera: Camera2D,
    state: GameState,
    /// Events emitted since the last `clear_events`.
    events: Vec<GameEvent>,
    steps: u64,
}

impl Game {
    pub fn new(config: GameConfig, physics: PhysicsConfig, level: LevelDesc) -> Self {
        let scene = Scene::from_level(&level, &physics);
        let physics = PhysicsEngine::new(physics, config.world_bounds()).with_max_step_dt(config.max_step_dt);

        let mut camera = Camera2D::new(config.window_width, config.window_height);
        camera.set_smoothing(config.camera_smoothing);

        let mut game = Self {
            config,
            level,
            scene,
            physics,
            camera,
            state: GameState::Playing,
            events: Vec::new(),
            steps: 0,
        };
        game.register_all();
        game.snap_camera();
        game
    }

    /// Game with the stock level and default tunables.
    pub fn with_default_level(config: GameConfig) -> Self {
        let level = LevelDesc::default_level(&config);
        Self::new(config, PhysicsConfig::default(), level)
    }

    fn register_all(&mut self) {
        self.physics.initialize();
        self.physics.register_platforms(&self.scene.platforms);
        self.physics.register_player(&self.scene.player);
        self.physics.register_enemies(&self.scene.enemies);
        self.physics.register_npcs(self.scene.npcs.as_slice());
    }

    fn snap_camera(&mut self) {
        self.camera.set_bounds(0.0, self.scene.width);
        self.camera.look_at(self.scene.player.center().x);
    }

    /// Swap in a new level. Loaded animations carry over.
    pub fn load_level(&mut self, level: LevelDesc) {
        self.level = level;
        self.rebuild();
        log::info!("level loaded: width {}", self.scene.width);
    }

    /// Rebuild the current level from its description and resume play.
    pub fn reset(&mut self) {
        self.rebuild();
        self.events.push(GameEvent::new(EventKind::Reset, 0.0, 0.0, 0.0));
        log::info!("game reset");
    }

    fn rebuild(&mut self) {
        let mut scene = Scene::from_level(&self.level, self.physics.config());
        scene.inherit_animations(&self.scene);
        self.scene = scene;
        self.state = GameState::Playing;
        self.register_all();
        self.snap_camera();
    }

    /// Advance the game by one fixed step.
    pub fn update(&mut self, dt: f32, controls: &Controls) {
        self.steps += 1;

        if self.state == GameState::GameOver {
            if controls.just_pressed(Action::Restart) {
                self.reset();
            } else {
                // World stays frozen; only the death animation plays out.
                self.scene.player.derive_behavior();
                self.scene.player.animation.update(dt);
            }
            return;
        }

        let jumped = self
            .scene
            .player
            .update(dt, controls, &self.scene.ladders, self.physics.config());
        if jumped {
            let p = self.scene.player.center();
            self.events.push(GameEvent::new(EventKind::Jump, p.x, p.y, 0.0));
        }

        for enemy in &mut self.scene.enemies {
            enemy.update_patrol();
        }
        self.scene.npcs.update(dt);
        if controls.just_pressed(Action::Interact) {
            self.try_interact();
        }

        let report = self
            .physics
            .step(dt, &mut self.scene.player, &mut self.scene.enemies);
        self.physics.step_npcs(dt, self.scene.npcs.as_mut_slice());
        if report.player_landed {
            let p = self.scene.player.center();
            self.events.push(GameEvent::new(EventKind::Land, p.x, p.y, 0.0));
        }

        self.resolve_contacts();

        self.scene.player.derive_behavior();
        for enemy in &mut self.scene.enemies {
            enemy.derive_behavior();
        }
        tick_animations(&mut self.scene, dt);

        self.camera.follow(self.scene.player.center(), dt);
    }

    fn try_interact(&mut self) {
        let center = self.scene.player.center();
        let range = self.config.interact_range;
        let Some(id) = self.scene.npcs.nearest_in_range(center, range) else {
            return;
        };
        if self.scene.npcs.interact(id, center, range) {
            self.events
                .push(GameEvent::new(EventKind::NpcInteract, id.0 as f32, center.x, center.y));
        }
    }

    /// Enemy contact: one point of damage, knockback away from the enemy.
    fn resolve_contacts(&mut self) {
        let player_box = self.scene.player.bounds();
        let Some(enemy_x) = self
            .scene
            .enemies
            .iter()
            .map(|e| e.bounds())
            .find(|b| b.intersects(&player_box))
            .map(|b| b.center().x)
        else {
            return;
        };

        let knockback = Vec2::new(self.config.knockback_x, self.config.knockback_y);
        let player = &mut self.scene.player;
        if !player.take_hit(enemy_x, self.config.hit_cooldown, knockback) {
            return;
        }

        let p = player.center();
        self.events.push(GameEvent::new(
            EventKind::PlayerHit,
            player.health() as f32,
            p.x,
            p.y,
        ));
        if player.is_dead() {
            self.events
                .push(GameEvent::new(EventKind::PlayerDied, p.x, p.y, 0.0));
            self.state = GameState::GameOver;
            log::info!("game over after {} steps", self.steps);
        }
    }

    // -- Roster changes that keep physics in sync --

    /// Add an enemy at run time. Uses the configured enemy speed.
    pub fn spawn_enemy(&mut self, position: Vec2, patrol_width: f32) -> EntityId {
        let speed = self.physics.config().enemy_speed;
        let id = self.scene.spawn_enemy(position, patrol_width, speed);
        self.physics.register_enemies(&self.scene.enemies);
        id
    }

    pub fn despawn_enemy(&mut self, id: EntityId) -> bool {
        let removed = self.scene.despawn_enemy(id).is_some();
        if removed {
            self.physics.register_enemies(&self.scene.enemies);
        }
        removed
    }

    pub fn spawn_npc(&mut self, name: &str, x: f32, y: f32) -> EntityId {
        let id = self.scene.spawn_npc(name, x, y);
        self.physics.register_npcs(self.scene.npcs.as_slice());
        id
    }

    pub fn remove_npc(&mut self, id: EntityId) -> bool {
        let removed = self.scene.npcs.remove(id).is_some();
        if removed {
            self.physics.register_npcs(self.scene.npcs.as_slice());
        }
        removed
    }

    // -- Accessors --

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> &LevelDesc {
        &self.level
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direct roster access. Adding or removing entities here bypasses
    /// physics registration; use the spawn helpers for that.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn physics(&self) -> &PhysicsEngine {
        &self.physics
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Forget events the host has already read.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Fixed steps taken since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
