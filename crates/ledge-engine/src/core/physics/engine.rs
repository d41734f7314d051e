//! Per-frame integration and collision for every dynamic body.
//!
//! The engine owns a handle table of physics components keyed by
//! `EntityId`. Entities are borrowed each step; components are re-derived
//! from their current bounds before anything is tested against them.

use std::collections::HashMap;

use crate::api::config::{BodyShape, PhysicsConfig, WorldBounds};
use crate::api::types::EntityId;
use crate::components::kinematics::{GroundState, Kinematics};
use crate::core::physics::collision::{
    resolve_platforms, Mover, ResolveRules, Side, SideResponse, SNAP_EPSILON,
};
use crate::core::physics::component::{BodyKind, PhysicsComponent};
use crate::core::rect::Rect;
use crate::entities::enemy::{Enemy, Patrol};
use crate::entities::npc::Npc;
use crate::entities::player::Player;
use crate::level::Platform;

/// Band around a surface within which a body counts as standing on it.
pub const GROUND_TOLERANCE: f32 = 2.0;
/// Default probe distance callers pass to `is_on_ground`.
pub const GROUND_CHECK_DISTANCE: f32 = 5.0;
/// How far past its leading edge an enemy looks for more floor.
pub const EDGE_PROBE: f32 = 5.0;
/// A climbing player whose head is within this distance above a platform
/// top steps off the ladder onto it.
pub const LADDER_EXIT_WINDOW: f32 = 5.0;

/// What happened during one `step`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// The player went from not grounded to grounded.
    pub player_landed: bool,
    /// Number of enemies that turned around because of a wall, an edge or
    /// the world bound.
    pub reversals: u32,
}

pub struct PhysicsEngine {
    config: PhysicsConfig,
    world: WorldBounds,
    max_step_dt: Option<f32>,
    bodies: HashMap<EntityId, PhysicsComponent>,
    player_id: Option<EntityId>,
    platforms: Vec<PhysicsComponent>,
}

impl PhysicsEngine {
    pub fn new(config: PhysicsConfig, world: WorldBounds) -> Self {
        Self {
            config: config.sanitized(),
            world,
            max_step_dt: None,
            bodies: HashMap::new(),
            player_id: None,
            platforms: Vec::new(),
        }
    }

    /// Clamp every step's dt to `max`. `None` leaves dt unguarded.
    pub fn with_max_step_dt(mut self, max: Option<f32>) -> Self {
        self.max_step_dt = max;
        self
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn world(&self) -> WorldBounds {
        self.world
    }

    /// Drop every component. Safe to call repeatedly.
    pub fn initialize(&mut self) {
        self.bodies.clear();
        self.player_id = None;
        self.platforms.clear();
    }

    fn shape_for(&self, kind: BodyKind) -> BodyShape {
        match kind {
            BodyKind::Player => self.config.player,
            BodyKind::Enemy => self.config.enemy,
            BodyKind::Npc => self.config.npc,
            BodyKind::Platform => BodyShape::default(),
        }
    }

    fn derive(&self, kind: BodyKind, bounds: Rect) -> PhysicsComponent {
        PhysicsComponent::dynamic(kind, bounds, &self.shape_for(kind))
    }

    pub fn register_player(&mut self, player: &Player) {
        if let Some(old) = self.player_id.take() {
            self.bodies.remove(&old);
        }
        self.bodies
            .insert(player.id, self.derive(BodyKind::Player, player.bounds()));
        self.player_id = Some(player.id);
    }

    /// Replace the platform list. Platforms never change after this.
    pub fn register_platforms(&mut self, platforms: &[Platform]) {
        let friction = self.config.platform_friction;
        self.platforms = platforms
            .iter()
            .map(|p| PhysicsComponent::platform(p.rect, friction))
            .collect();
    }

    /// Replace every enemy component with one per enemy in `enemies`.
    pub fn register_enemies(&mut self, enemies: &[Enemy]) {
        self.bodies.retain(|_, c| c.kind != BodyKind::Enemy);
        for enemy in enemies {
            let c = self.derive(BodyKind::Enemy, enemy.bounds());
            self.bodies.insert(enemy.id, c);
        }
    }

    /// Replace every NPC component with one per NPC in `npcs`.
    pub fn register_npcs(&mut self, npcs: &[Npc]) {
        self.bodies.retain(|_, c| c.kind != BodyKind::Npc);
        for npc in npcs {
            let c = self.derive(BodyKind::Npc, npc.bounds());
            self.bodies.insert(npc.id, c);
        }
    }

    pub fn player_component(&self) -> Option<&PhysicsComponent> {
        self.player_id.and_then(|id| self.bodies.get(&id))
    }

    pub fn component(&self, id: EntityId) -> Option<&PhysicsComponent> {
        self.bodies.get(&id)
    }

    pub fn platform_components(&self) -> &[PhysicsComponent] {
        &self.platforms
    }

    /// Dynamic components currently registered.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn dynamic_components(&self) -> impl Iterator<Item = (&EntityId, &PhysicsComponent)> {
        self.bodies.iter()
    }

    fn count(&self, kind: BodyKind) -> usize {
        self.bodies.values().filter(|c| c.kind == kind).count()
    }

    fn check_roster(&self, kind: BodyKind, live: usize) {
        let registered = self.count(kind);
        if registered != live {
            log::warn!("{kind:?} roster desync: {registered} components for {live} entities");
        }
    }

    /// Refresh one entity's component from its current bounds. A missing
    /// component is logged and derived on the spot.
    fn refresh(&mut self, id: EntityId, kind: BodyKind, bounds: Rect) -> PhysicsComponent {
        let shape = self.shape_for(kind);
        match self.bodies.get_mut(&id) {
            Some(c) => {
                c.collision_box = shape.collision_box(bounds);
                *c
            }
            None => {
                log::warn!("no {kind:?} component for {id:?}, deriving one");
                let c = PhysicsComponent::dynamic(kind, bounds, &shape);
                self.bodies.insert(id, c);
                if kind == BodyKind::Player {
                    self.player_id = Some(id);
                }
                c
            }
        }
    }

    fn store_box(&mut self, id: EntityId, collision_box: Rect) {
        if let Some(c) = self.bodies.get_mut(&id) {
            c.collision_box = collision_box;
        }
    }

    fn effective_dt(&self, dt: f32) -> f32 {
        match self.max_step_dt {
            Some(max) if dt > max => {
                log::debug!("step dt {dt} clamped to {max}");
                max
            }
            _ => dt,
        }
    }

    /// Top of the surface supporting `collision_box`, if its bottom lies
    /// within the ground band of the ground line or of a platform it
    /// overlaps horizontally. The band is `min(check_distance, 2.0)`.
    pub fn support_below(&self, collision_box: &Rect, check_distance: f32) -> Option<f32> {
        let tolerance = check_distance.min(GROUND_TOLERANCE);
        let bottom = collision_box.bottom();
        if (bottom - self.world.ground_line).abs() <= tolerance {
            return Some(self.world.ground_line);
        }
        self.platforms
            .iter()
            .map(|p| p.collision_box)
            .find(|p| collision_box.overlaps_x(p) && (bottom - p.top()).abs() <= tolerance)
            .map(|p| p.top())
    }

    pub fn is_on_ground(&self, component: &PhysicsComponent, check_distance: f32) -> bool {
        self.support_below(&component.collision_box, check_distance).is_some()
    }

    /// Whether there is floor under the point `x` at height `bottom`.
    fn has_floor_at(&self, x: f32, bottom: f32) -> bool {
        if (bottom - self.world.ground_line).abs() < EDGE_PROBE {
            return true;
        }
        self.platforms.iter().any(|p| {
            let r = p.collision_box;
            r.contains_x(x) && (bottom - r.top()).abs() < EDGE_PROBE
        })
    }

    /// Ground probe and gravity on the pre-move box.
    fn settle(&self, mover: &mut Mover<'_>, has_gravity: bool, dt: f32) {
        let b = mover.collision_box();
        let vy = mover.kin.velocity().y;
        match self.support_below(&b, GROUND_CHECK_DISTANCE) {
            Some(_) if vy < 0.0 => {
                if mover.kin.impulse_pending() {
                    log::debug!("upward impulse {vy} preserved on ground contact");
                }
                mover.kin.set_ground(GroundState::Airborne);
            }
            Some(surface) => {
                mover.kin.resolve_vertical(0.0);
                mover.kin.set_ground(GroundState::OnGround);
                if b.bottom() > surface {
                    mover.set_box_bottom(surface - SNAP_EPSILON);
                }
            }
            None => {
                mover.kin.set_ground(GroundState::Airborne);
                if has_gravity {
                    let vy = (vy + self.config.gravity * dt).min(self.config.terminal_velocity);
                    mover.kin.resolve_vertical(vy);
                }
            }
        }
    }

    /// Lift a body that ended up below the ground line back on top of it.
    fn safety_net(&self, mover: &mut Mover<'_>, landed: bool) -> bool {
        if landed || mover.collision_box().bottom() <= self.world.ground_line {
            return false;
        }
        log::debug!("body below ground line at y={}, lifting", mover.kin.position.y);
        mover.set_box_bottom(self.world.ground_line - SNAP_EPSILON);
        mover.kin.resolve_vertical(0.0);
        if mover.kin.ground() != GroundState::OnLadder {
            mover.kin.set_ground(GroundState::OnGround);
        }
        true
    }

    fn clamp_min_x(&self, kin: &mut Kinematics) -> bool {
        if kin.position.x < self.world.min_x {
            kin.position.x = self.world.min_x;
            return true;
        }
        false
    }

    /// Advance the player and every enemy by `dt` seconds.
    pub fn step(&mut self, dt: f32, player: &mut Player, enemies: &mut [Enemy]) -> StepReport {
        let dt = self.effective_dt(dt);
        self.check_roster(BodyKind::Enemy, enemies.len());

        let mut report = StepReport {
            player_landed: self.step_player(dt, player),
            reversals: 0,
        };
        for enemy in enemies.iter_mut() {
            if self.step_enemy(dt, enemy) {
                report.reversals += 1;
            }
        }
        report
    }

    fn step_player(&mut self, dt: f32, player: &mut Player) -> bool {
        let comp = self.refresh(player.id, BodyKind::Player, player.bounds());
        let prev = comp.collision_box;
        let was_grounded = player.kin.is_grounded();
        let rules = ResolveRules {
            one_way: self.config.one_way_platforms,
            side: Some(SideResponse::BlockUnlessRising),
            friction: true,
        };

        let mut mover = Mover {
            kin: &mut player.kin,
            size: player.size,
            shape: self.config.player,
        };
        let mut landed = false;

        if mover.kin.ground() == GroundState::OnLadder {
            integrate(mover.kin, dt);
            self.ladder_exit(&mut mover);
        } else {
            self.settle(&mut mover, comp.has_gravity, dt);
            integrate(mover.kin, dt);
            landed = resolve_platforms(&mut mover, prev, &self.platforms, rules).landed;
        }

        self.safety_net(&mut mover, landed);
        self.clamp_min_x(mover.kin);
        let collision_box = mover.collision_box();
        player.kin.end_step();
        self.store_box(player.id, collision_box);

        !was_grounded && player.kin.is_grounded()
    }

    /// Climbing up past a platform top puts the player on the platform.
    fn ladder_exit(&self, mover: &mut Mover<'_>) {
        if mover.kin.velocity().y >= 0.0 {
            return;
        }
        let b = mover.collision_box();
        let exit = self.platforms.iter().map(|p| p.collision_box).find(|p| {
            b.top() <= p.top()
                && b.top() + LADDER_EXIT_WINDOW >= p.top()
                && b.right() > p.left()
                && b.left() < p.right()
        });
        if let Some(p) = exit {
            log::debug!("ladder top-out onto platform at y={}", p.top());
            mover.land_on(p.top());
        }
    }

    /// Returns true if the enemy turned around.
    fn step_enemy(&mut self, dt: f32, enemy: &mut Enemy) -> bool {
        let comp = self.refresh(enemy.id, BodyKind::Enemy, enemy.bounds());
        let prev = comp.collision_box;
        let start = enemy.patrol();
        let rules = ResolveRules {
            one_way: self.config.one_way_platforms,
            side: Some(SideResponse::Block),
            friction: true,
        };

        let mut mover = Mover {
            kin: &mut enemy.kin,
            size: enemy.size,
            shape: self.config.enemy,
        };
        self.settle(&mut mover, comp.has_gravity, dt);
        integrate(mover.kin, dt);
        let contacts = resolve_platforms(&mut mover, prev, &self.platforms, rules);
        self.safety_net(&mut mover, contacts.landed);
        let clamped = self.clamp_min_x(mover.kin);
        let b = mover.collision_box();
        let grounded = mover.kin.is_grounded();

        match contacts.side {
            Some(Side::Right) => enemy.reverse(Patrol::MovingLeft),
            Some(Side::Left) => enemy.reverse(Patrol::MovingRight),
            None => {}
        }
        if clamped {
            enemy.reverse(Patrol::MovingRight);
        }

        if grounded {
            let left_ok = self.has_floor_at(b.left() - EDGE_PROBE, b.bottom());
            let right_ok = self.has_floor_at(b.right() + EDGE_PROBE, b.bottom());
            match enemy.patrol() {
                Patrol::MovingLeft if !left_ok => enemy.reverse(Patrol::MovingRight),
                Patrol::MovingRight if !right_ok => enemy.reverse(Patrol::MovingLeft),
                _ => {}
            }
        }

        enemy.sync_velocity();
        enemy.kin.end_step();
        self.store_box(enemy.id, b);
        enemy.patrol() != start
    }

    /// Vertical settling for NPCs: gravity, landing and the ground-line
    /// safety net. No bounce and no friction; static components get no side
    /// response.
    pub fn step_npcs(&mut self, dt: f32, npcs: &mut [Npc]) {
        let dt = self.effective_dt(dt);
        self.check_roster(BodyKind::Npc, npcs.len());

        for npc in npcs.iter_mut().filter(|n| n.active) {
            let comp = self.refresh(npc.id, BodyKind::Npc, npc.bounds());
            let prev = comp.collision_box;
            let rules = ResolveRules {
                one_way: true,
                side: (!comp.is_static).then_some(SideResponse::Block),
                friction: false,
            };
            let mut mover = Mover {
                kin: &mut npc.kin,
                size: npc.size,
                shape: self.config.npc.with_bounce(0.0),
            };
            self.settle(&mut mover, comp.has_gravity, dt);
            let vy = mover.kin.velocity().y;
            mover.kin.translate(glam::Vec2::new(0.0, vy * dt));
            let contacts = resolve_platforms(&mut mover, prev, &self.platforms, rules);
            self.safety_net(&mut mover, contacts.landed);
            let b = mover.collision_box();
            npc.kin.end_step();
            self.store_box(npc.id, b);
        }
    }
}

fn integrate(kin: &mut Kinematics, dt: f32) {
    let v = kin.velocity();
    kin.translate(v * dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> WorldBounds {
        WorldBounds {
            min_x: 0.0,
            ground_line: 540.0,
        }
    }

    fn engine_with(platforms: &[Platform]) -> PhysicsEngine {
        let mut engine = PhysicsEngine::new(PhysicsConfig::default(), world());
        engine.register_platforms(platforms);
        engine
    }

    fn floor() -> Platform {
        Platform::new(0.0, 540.0, 3000.0, 60.0)
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(EntityId(0), Vec2::new(x, y))
    }

    #[test]
    fn resting_body_does_not_drift() {
        let mut engine = engine_with(&[floor()]);
        let mut player = player_at(100.0, 509.9);
        engine.register_player(&player);

        engine.step(DT, &mut player, &mut []);
        let settled = player.kin.position;
        for _ in 0..30 {
            engine.step(DT, &mut player, &mut []);
            assert_eq!(player.kin.position, settled);
            assert_eq!(player.kin.velocity().y, 0.0);
            assert!(player.kin.is_grounded());
        }
    }

    #[test]
    fn jump_impulse_survives_ground_contact() {
        let mut engine = engine_with(&[floor()]);
        let mut player = player_at(100.0, 509.9);
        engine.register_player(&player);
        engine.step(DT, &mut player, &mut []);
        assert!(player.kin.is_grounded());

        player.kin.impulse_vertical(-900.0);
        engine.step(DT, &mut player, &mut []);
        assert_eq!(player.kin.ground(), GroundState::Airborne);
        assert_eq!(player.kin.velocity().y, -900.0);
        assert!((player.kin.position.y - (509.9 - 15.0)).abs() < 1e-3);
        assert!(!player.kin.impulse_pending());
    }

    #[test]
    fn falling_body_never_sinks() {
        let mut engine = engine_with(&[floor()]);
        let mut player = player_at(100.0, 200.0);
        engine.register_player(&player);

        let mut landed = 0;
        for _ in 0..180 {
            if engine.step(DT, &mut player, &mut []).player_landed {
                landed += 1;
            }
            assert!(player.bounds().bottom() <= 540.0 + 0.2);
        }
        assert_eq!(landed, 1);
        assert!(player.kin.is_grounded());
        assert!((player.bounds().bottom() - 540.0).abs() <= GROUND_TOLERANCE);
    }

    #[test]
    fn wall_hit_reverses_enemy() {
        let wall = Platform::new(600.0, 400.0, 50.0, 140.0);
        let mut engine = engine_with(&[floor(), wall]);
        let mut player = player_at(10.0, 509.9);
        let mut enemies = vec![Enemy::new(EntityId(1), Vec2::new(560.0, 509.9), 400.0, 120.0)];
        engine.register_player(&player);
        engine.register_enemies(&enemies);

        let mut reversals = 0;
        for _ in 0..30 {
            reversals += engine.step(DT, &mut player, &mut enemies).reversals;
            assert!(enemies[0].bounds().right() <= 600.0 + 1e-3);
        }
        assert_eq!(reversals, 1);
        assert_eq!(enemies[0].patrol(), Patrol::MovingLeft);
        assert!(enemies[0].kin.velocity().x < 0.0);
    }

    #[test]
    fn enemy_turns_at_platform_edges() {
        let ledge = Platform::new(300.0, 400.0, 200.0, 20.0);
        let mut engine = engine_with(&[floor(), ledge]);
        let mut player = player_at(10.0, 509.9);
        let mut enemies = vec![Enemy::new(EntityId(1), Vec2::new(320.0, 370.0), 400.0, 120.0)];
        engine.register_player(&player);
        engine.register_enemies(&enemies);

        let mut saw_left = false;
        for _ in 0..600 {
            enemies[0].update_patrol();
            engine.step(DT, &mut player, &mut enemies);
            let b = enemies[0].bounds();
            assert!(b.bottom() <= 400.0 + 0.2, "fell off the ledge: {b:?}");
            assert!(b.left() >= 300.0 - 5.0 && b.right() <= 500.0 + 5.0);
            saw_left |= enemies[0].patrol() == Patrol::MovingLeft;
        }
        assert!(saw_left);
    }

    #[test]
    fn one_way_platform_lets_player_jump_through() {
        let ledge = Platform::new(0.0, 450.0, 200.0, 20.0);
        let mut engine = PhysicsEngine::new(
            PhysicsConfig {
                one_way_platforms: true,
                ..Default::default()
            },
            world(),
        );
        engine.register_platforms(&[floor(), ledge]);
        let mut player = player_at(100.0, 509.9);
        engine.register_player(&player);
        engine.step(DT, &mut player, &mut []);

        player.kin.impulse_vertical(-900.0);
        for _ in 0..120 {
            engine.step(DT, &mut player, &mut []);
        }
        assert!(player.kin.is_grounded());
        assert!((player.bounds().bottom() - 450.0).abs() <= GROUND_TOLERANCE);
    }

    #[test]
    fn solid_platform_blocks_jump() {
        let ledge = Platform::new(0.0, 450.0, 200.0, 20.0);
        let mut engine = engine_with(&[floor(), ledge]);
        let mut player = player_at(100.0, 509.9);
        engine.register_player(&player);
        engine.step(DT, &mut player, &mut []);

        player.kin.impulse_vertical(-900.0);
        let mut min_top = f32::MAX;
        for _ in 0..120 {
            engine.step(DT, &mut player, &mut []);
            min_top = min_top.min(player.bounds().top());
        }
        assert!(min_top >= 470.0);
        assert!((player.bounds().bottom() - 540.0).abs() <= GROUND_TOLERANCE);
    }

    #[test]
    fn running_jump_through_one_way_platform_moves_smoothly() {
        let slab = Platform::new(100.0, 362.0, 2000.0, 20.0);
        let mut engine = PhysicsEngine::new(
            PhysicsConfig {
                one_way_platforms: true,
                ..Default::default()
            },
            world(),
        );
        engine.register_platforms(&[floor(), slab]);
        let mut player = player_at(40.0, 509.9);
        engine.register_player(&player);
        engine.step(DT, &mut player, &mut []);

        player.kin.impulse_vertical(-900.0);
        let max_dx = 240.0 * DT + 1e-3;
        for frame in 0..90 {
            player.kin.drive_horizontal(240.0);
            let before = player.kin.position.x;
            engine.step(DT, &mut player, &mut []);
            let dx = player.kin.position.x - before;
            assert!(
                (0.0..=max_dx).contains(&dx),
                "frame {frame}: x moved {dx} ({before} -> {})",
                player.kin.position.x
            );
        }
    }

    #[test]
    fn stepping_off_a_ladder_inside_a_platform_keeps_x() {
        let ledge = Platform::new(100.0, 300.0, 400.0, 20.0);
        let mut engine = engine_with(&[floor(), ledge]);
        // Head inside the ledge, as if climbing through it.
        let mut player = player_at(300.0, 305.0);
        engine.register_player(&player);

        let max_dx = 240.0 * DT + 1e-3;
        for frame in 0..60 {
            player.kin.drive_horizontal(240.0);
            let before = player.kin.position.x;
            engine.step(DT, &mut player, &mut []);
            let dx = player.kin.position.x - before;
            assert!(
                (0.0..=max_dx).contains(&dx),
                "frame {frame}: x moved {dx} ({before} -> {})",
                player.kin.position.x
            );
        }
        assert!(player.kin.is_grounded());
        assert!((player.bounds().bottom() - 540.0).abs() <= GROUND_TOLERANCE);
    }

    #[test]
    fn resting_against_a_wall_stays_blocked() {
        let wall = Platform::new(200.0, 400.0, 50.0, 140.0);
        let mut engine = engine_with(&[floor(), wall]);
        let mut player = player_at(160.0, 509.9);
        engine.register_player(&player);
        for _ in 0..60 {
            player.kin.drive_horizontal(240.0);
            engine.step(DT, &mut player, &mut []);
            assert!(player.bounds().right() <= 200.0 + 1e-3);
        }
    }

    #[test]
    fn ladder_top_out_lands_on_platform() {
        let ledge = Platform::new(100.0, 300.0, 200.0, 20.0);
        let mut engine = engine_with(&[floor(), ledge]);
        let mut player = player_at(150.0, 306.0);
        player.kin.set_ground(GroundState::OnLadder);
        engine.register_player(&player);

        for _ in 0..4 {
            if player.kin.ground() == GroundState::OnLadder {
                player.kin.impulse_vertical(-180.0);
            }
            engine.step(DT, &mut player, &mut []);
        }
        assert!(player.kin.is_grounded());
        assert!((player.bounds().bottom() - 299.9).abs() < 1e-3);
    }

    #[test]
    fn ladder_ignores_gravity() {
        let mut engine = engine_with(&[floor()]);
        let mut player = player_at(150.0, 300.0);
        player.kin.set_ground(GroundState::OnLadder);
        engine.register_player(&player);
        for _ in 0..10 {
            engine.step(DT, &mut player, &mut []);
        }
        assert_eq!(player.kin.position.y, 300.0);
        assert_eq!(player.kin.ground(), GroundState::OnLadder);
    }

    #[test]
    fn missing_component_is_derived_on_the_fly() {
        let mut engine = engine_with(&[floor()]);
        let mut player = player_at(10.0, 509.9);
        let mut enemies = vec![Enemy::new(EntityId(7), Vec2::new(500.0, 509.9), 150.0, 120.0)];
        engine.register_player(&player);

        engine.step(DT, &mut player, &mut enemies);
        assert!(engine.component(EntityId(7)).is_some());
        assert_eq!(engine.body_count(), 2);
    }

    #[test]
    fn register_replaces_components_of_a_kind() {
        let mut engine = engine_with(&[floor()]);
        let player = player_at(10.0, 509.9);
        engine.register_player(&player);
        let enemies: Vec<_> = (1..4)
            .map(|i| Enemy::new(EntityId(i), Vec2::new(100.0 * i as f32, 509.9), 50.0, 120.0))
            .collect();
        engine.register_enemies(&enemies);
        assert_eq!(engine.body_count(), 4);

        engine.register_enemies(&enemies[..1]);
        assert_eq!(engine.body_count(), 2);
        assert!(engine.component(EntityId(3)).is_none());
        assert!(engine.player_component().is_some());

        engine.initialize();
        engine.initialize();
        assert_eq!(engine.body_count(), 0);
        assert!(engine.platform_components().is_empty());
    }

    #[test]
    fn npcs_settle_onto_the_floor() {
        let mut engine = engine_with(&[floor()]);
        let mut npcs = vec![
            Npc::new(EntityId(1), "Elder", Vec2::new(100.0, 400.0)),
            Npc::new(EntityId(2), "Ghost", Vec2::new(200.0, 400.0)),
        ];
        npcs[1].active = false;
        engine.register_npcs(&npcs);

        for _ in 0..120 {
            engine.step_npcs(DT, &mut npcs);
        }
        assert!((npcs[0].bounds().bottom() - 540.0).abs() <= GROUND_TOLERANCE);
        assert!(npcs[0].kin.is_grounded());
        assert_eq!(npcs[0].kin.position.x, 100.0);
        assert_eq!(npcs[1].kin.position.y, 400.0);
    }

    #[test]
    fn large_dt_is_clamped_when_configured() {
        let mut engine = engine_with(&[floor()]).with_max_step_dt(Some(1.0 / 30.0));
        let mut player = player_at(100.0, 100.0);
        engine.register_player(&player);
        engine.step(1.0, &mut player, &mut []);
        assert!((player.kin.velocity().y - 72.0).abs() < 1e-3);
        assert!(player.kin.position.y - 100.0 < 3.0);
    }

    #[test]
    fn body_below_ground_line_is_lifted() {
        let mut engine = engine_with(&[]);
        let mut player = player_at(100.0, 560.0);
        engine.register_player(&player);
        engine.step(DT, &mut player, &mut []);
        assert!((player.bounds().bottom() - 539.9).abs() < 1e-3);
        assert!(player.kin.is_grounded());
        assert_eq!(player.kin.velocity().y, 0.0);
    }

    #[test]
    fn left_world_bound_turns_enemies() {
        let mut engine = engine_with(&[floor()]);
        let mut player = player_at(-10.0, 509.9);
        let mut enemies = vec![Enemy::new(EntityId(1), Vec2::new(1.0, 509.9), 150.0, 120.0)];
        enemies[0].reverse(Patrol::MovingLeft);
        engine.register_player(&player);
        engine.register_enemies(&enemies);

        engine.step(DT, &mut player, &mut enemies);
        assert_eq!(player.kin.position.x, 0.0);
        assert_eq!(enemies[0].kin.position.x, 0.0);
        assert_eq!(enemies[0].patrol(), Patrol::MovingRight);
    }

    #[test]
    fn ground_band_is_narrowed_to_two_pixels() {
        let engine = engine_with(&[floor()]);
        let comp = PhysicsComponent::dynamic(
            BodyKind::Player,
            Rect::new(0.0, 511.5, 30.0, 30.0),
            &BodyShape::default(),
        );
        assert!(engine.is_on_ground(&comp, GROUND_CHECK_DISTANCE));
        assert!(!engine.is_on_ground(&comp, 1.0));

        let high = Rect::new(0.0, 505.0, 30.0, 30.0);
        assert_eq!(engine.support_below(&high, 10.0), None);
    }
}
