//! The player character: input handling, ladders, health and behavior.
//!
//! `update` runs before the physics step and only writes intent (horizontal
//! speed, jump or climb impulses). `derive_behavior` runs after the step and
//! reads the settled state.

use glam::Vec2;

use crate::api::config::PhysicsConfig;
use crate::api::types::EntityId;
use crate::components::animation::Animation;
use crate::components::behavior::BehaviorState;
use crate::components::kinematics::{Facing, GroundState, Kinematics};
use crate::core::rect::Rect;
use crate::input::queue::{Action, Controls};
use crate::level::Ladder;

pub const PLAYER_SIZE: Vec2 = Vec2::new(30.0, 30.0);
pub const MAX_HEALTH: u32 = 3;
/// Seconds the attack behavior lasts after the attack key goes down.
pub const ATTACK_DURATION: f32 = 0.3;
/// Seconds the hurt behavior lasts after a hit.
pub const HIT_STUN: f32 = 0.4;
/// Seconds after jumping off a ladder before it can be grabbed again.
const LADDER_REGRAB_DELAY: f32 = 0.25;
/// Horizontal speed above which the player counts as walking.
const WALK_THRESHOLD: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub kin: Kinematics,
    pub size: Vec2,
    pub animation: Animation,
    behavior: BehaviorState,
    health: u32,
    max_health: u32,
    hit_cooldown: f32,
    hit_stun: f32,
    attack_timer: f32,
    ladder_regrab: f32,
}

impl Player {
    pub fn new(id: EntityId, spawn: Vec2) -> Self {
        Self {
            id,
            kin: Kinematics::at(spawn),
            size: PLAYER_SIZE,
            animation: Animation::default(),
            behavior: BehaviorState::Idle,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            hit_cooldown: 0.0,
            hit_stun: 0.0,
            attack_timer: 0.0,
            ladder_regrab: 0.0,
        }
    }

    /// Rendered bounds.
    pub fn bounds(&self) -> Rect {
        self.kin.bounds(self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn behavior(&self) -> BehaviorState {
        self.behavior
    }

    /// True while the post-hit invulnerability window is running.
    pub fn is_invulnerable(&self) -> bool {
        self.hit_cooldown > 0.0
    }

    pub fn hit_cooldown(&self) -> f32 {
        self.hit_cooldown
    }

    /// Blink during invulnerability: visible on even tenths of a second.
    pub fn is_visible(&self) -> bool {
        if self.hit_cooldown <= 0.0 {
            return true;
        }
        ((self.hit_cooldown * 10.0) as i32) % 2 == 0
    }

    /// Apply one frame of input. Returns true if a jump was started.
    pub fn update(&mut self, dt: f32, controls: &Controls, ladders: &[Ladder], tuning: &PhysicsConfig) -> bool {
        self.hit_cooldown = (self.hit_cooldown - dt).max(0.0);
        self.hit_stun = (self.hit_stun - dt).max(0.0);
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        self.ladder_regrab = (self.ladder_regrab - dt).max(0.0);

        if self.is_dead() {
            self.kin.drive_horizontal(0.0);
            return false;
        }

        self.update_horizontal(dt, controls, tuning);
        self.update_ladder(controls, ladders);

        if controls.just_pressed(Action::Attack) && self.attack_timer <= 0.0 {
            self.attack_timer = ATTACK_DURATION;
        }

        let jump = controls.just_pressed(Action::Jump);
        match self.kin.ground() {
            GroundState::OnLadder if jump => {
                self.take_off(tuning.jump_force);
                self.ladder_regrab = LADDER_REGRAB_DELAY;
                true
            }
            GroundState::OnLadder => {
                let vy = if controls.held(Action::Up) {
                    -tuning.climb_speed
                } else if controls.held(Action::Down) {
                    tuning.climb_speed
                } else {
                    0.0
                };
                self.kin.impulse_vertical(vy);
                false
            }
            GroundState::OnGround if jump => {
                self.take_off(tuning.jump_force);
                true
            }
            _ => false,
        }
    }

    fn take_off(&mut self, jump_force: f32) {
        self.kin.impulse_vertical(jump_force);
        self.kin.set_ground(GroundState::Airborne);
        log::debug!("player jump at {:?}", self.kin.position);
    }

    fn update_horizontal(&mut self, dt: f32, controls: &Controls, tuning: &PhysicsConfig) {
        let axis = controls.axis_x();
        let target = axis * tuning.player_max_speed;
        let vx = self.kin.velocity().x;
        let next = if tuning.player_acceleration <= 0.0 {
            target
        } else {
            let max_delta = tuning.player_acceleration * dt;
            vx + (target - vx).clamp(-max_delta, max_delta)
        };
        self.kin.drive_horizontal(next);

        if axis < 0.0 {
            self.kin.face(Facing::Left);
        } else if axis > 0.0 {
            self.kin.face(Facing::Right);
        }
    }

    /// Grab a ladder with up/down while overlapping it, release when leaving it.
    ///
    /// Up only grabs a ladder that continues above the player's head and down
    /// only one that continues below the feet, so standing on a platform at a
    /// ladder's top or foot does not snag it.
    fn update_ladder(&mut self, controls: &Controls, ladders: &[Ladder]) {
        let bounds = self.bounds();
        let touching = ladders.iter().filter(|l| l.rect.intersects(&bounds));

        if self.kin.ground() == GroundState::OnLadder {
            if touching.count() == 0 {
                self.kin.set_ground(GroundState::Airborne);
                self.kin.impulse_vertical(0.0);
            }
            return;
        }

        if self.ladder_regrab > 0.0 {
            return;
        }
        let up = controls.held(Action::Up);
        let down = controls.held(Action::Down);
        let grab = touching.into_iter().any(|l| {
            (up && l.rect.top() < bounds.top()) || (down && l.rect.bottom() > bounds.bottom())
        });
        if grab {
            self.kin.set_ground(GroundState::OnLadder);
        }
    }

    /// Take one point of damage from an enemy centered at `from_x`.
    ///
    /// Ignored while invulnerable. Knocks the player away from the enemy and
    /// upward, then starts the invulnerability window. Returns true if the
    /// hit landed.
    pub fn take_hit(&mut self, from_x: f32, cooldown: f32, knockback: Vec2) -> bool {
        if self.is_invulnerable() || self.is_dead() {
            return false;
        }
        self.health -= 1;
        self.hit_cooldown = cooldown;
        self.hit_stun = HIT_STUN;

        let away = if self.center().x < from_x { -1.0 } else { 1.0 };
        self.kin.position += Vec2::new(away * knockback.x, -knockback.y);
        if self.kin.ground() != GroundState::Airborne {
            self.kin.set_ground(GroundState::Airborne);
        }
        log::info!("player hit, health {}/{}", self.health, self.max_health);
        true
    }

    /// Pick the behavior for this frame from settled physics and timers.
    /// Priority: Die > GetHit > Attack > Jumping > Walking > Idle.
    pub fn derive_behavior(&mut self) -> BehaviorState {
        let v = self.kin.velocity();
        let ground = self.kin.ground();
        self.behavior = if self.is_dead() {
            BehaviorState::Die
        } else if self.hit_stun > 0.0 {
            BehaviorState::GetHit
        } else if self.attack_timer > 0.0 {
            BehaviorState::Attack
        } else if ground == GroundState::Airborne {
            BehaviorState::Jumping
        } else if v.x.abs() > WALK_THRESHOLD || (ground == GroundState::OnLadder && v.y != 0.0) {
            BehaviorState::Walking
        } else {
            BehaviorState::Idle
        };
        self.animation.set_state(self.behavior);
        self.behavior
    }

    /// Back to full health at `spawn`, keeping loaded animations.
    pub fn reset(&mut self, spawn: Vec2) {
        self.kin = Kinematics::at(spawn);
        self.health = self.max_health;
        self.hit_cooldown = 0.0;
        self.hit_stun = 0.0;
        self.attack_timer = 0.0;
        self.ladder_regrab = 0.0;
        self.behavior = BehaviorState::Idle;
        self.animation.set_state(BehaviorState::Idle);
        self.animation.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(EntityId(1), Vec2::new(100.0, 530.0))
    }

    fn grounded() -> Player {
        let mut p = player();
        p.kin.set_ground(GroundState::OnGround);
        p
    }

    #[test]
    fn acceleration_ramps_toward_max_speed() {
        let mut p = grounded();
        let tuning = PhysicsConfig::default();
        let mut c = Controls::new();
        c.press(Action::Right);

        p.update(0.1, &c, &[], &tuning);
        assert!((p.kin.velocity().x - 240.0).abs() < 1e-3);
        p.update(0.1, &c, &[], &tuning);
        assert_eq!(p.kin.velocity().x, 300.0);
        assert_eq!(p.kin.facing, Facing::Right);
    }

    #[test]
    fn zero_acceleration_snaps() {
        let mut p = grounded();
        let tuning = PhysicsConfig {
            player_acceleration: 0.0,
            ..Default::default()
        };
        let mut c = Controls::new();
        c.press(Action::Left);
        p.update(1.0 / 60.0, &c, &[], &tuning);
        assert_eq!(p.kin.velocity().x, -300.0);
        assert!(p.kin.facing.is_left());
    }

    #[test]
    fn jump_requires_ground() {
        let tuning = PhysicsConfig::default();
        let mut c = Controls::new();
        c.press(Action::Jump);

        let mut airborne = player();
        assert!(!airborne.update(1.0 / 60.0, &c, &[], &tuning));

        let mut p = grounded();
        assert!(p.update(1.0 / 60.0, &c, &[], &tuning));
        assert_eq!(p.kin.velocity().y, tuning.jump_force);
        assert!(p.kin.impulse_pending());
        assert_eq!(p.kin.ground(), GroundState::Airborne);
    }

    #[test]
    fn up_grabs_ladder_and_climbs() {
        let tuning = PhysicsConfig::default();
        let ladder = Ladder::new(95.0, 300.0, 30.0, 260.0);
        let mut p = grounded();
        let mut c = Controls::new();
        c.press(Action::Up);

        p.update(1.0 / 60.0, &c, &[ladder], &tuning);
        assert_eq!(p.kin.ground(), GroundState::OnLadder);
        assert_eq!(p.kin.velocity().y, -tuning.climb_speed);

        c.release(Action::Up);
        p.update(1.0 / 60.0, &c, &[ladder], &tuning);
        assert_eq!(p.kin.velocity().y, 0.0);
        assert_eq!(p.derive_behavior(), BehaviorState::Idle);
    }

    #[test]
    fn leaving_ladder_region_restores_gravity() {
        let tuning = PhysicsConfig::default();
        let ladder = Ladder::new(95.0, 300.0, 30.0, 260.0);
        let mut p = grounded();
        p.kin.set_ground(GroundState::OnLadder);
        p.kin.position.x = 400.0;
        p.update(1.0 / 60.0, &Controls::new(), &[ladder], &tuning);
        assert_eq!(p.kin.ground(), GroundState::Airborne);
    }

    #[test]
    fn jump_off_ladder_blocks_immediate_regrab() {
        let tuning = PhysicsConfig::default();
        let ladder = Ladder::new(95.0, 300.0, 30.0, 260.0);
        let mut p = grounded();
        p.kin.set_ground(GroundState::OnLadder);

        let mut c = Controls::new();
        c.press(Action::Up);
        c.press(Action::Jump);
        assert!(p.update(1.0 / 60.0, &c, &[ladder], &tuning));
        assert_eq!(p.kin.ground(), GroundState::Airborne);

        c.clear_edges();
        p.update(1.0 / 60.0, &c, &[ladder], &tuning);
        assert_eq!(p.kin.ground(), GroundState::Airborne);
    }

    #[test]
    fn hit_applies_knockback_and_cooldown() {
        let mut p = grounded();
        let start = p.kin.position;
        // Enemy to the right of the player's center.
        assert!(p.take_hit(200.0, 1.5, Vec2::new(50.0, 30.0)));
        assert_eq!(p.health(), 2);
        assert_eq!(p.kin.position, start + Vec2::new(-50.0, -30.0));
        assert!(p.is_invulnerable());

        // Second hit during the window is ignored.
        assert!(!p.take_hit(200.0, 1.5, Vec2::new(50.0, 30.0)));
        assert_eq!(p.health(), 2);
        assert_eq!(p.derive_behavior(), BehaviorState::GetHit);
    }

    #[test]
    fn blink_alternates_every_tenth() {
        let mut p = grounded();
        p.take_hit(0.0, 1.5, Vec2::ZERO);
        assert!(!p.is_visible());

        p.hit_cooldown = 1.25;
        assert!(p.is_visible());
        p.hit_cooldown = 1.35;
        assert!(!p.is_visible());

        p.update(2.0, &Controls::new(), &[], &PhysicsConfig::default());
        assert!(p.is_visible());
        assert!(!p.is_invulnerable());
    }

    #[test]
    fn behavior_priority() {
        let tuning = PhysicsConfig::default();
        let mut p = grounded();
        assert_eq!(p.derive_behavior(), BehaviorState::Idle);

        p.kin.drive_horizontal(120.0);
        assert_eq!(p.derive_behavior(), BehaviorState::Walking);

        p.kin.set_ground(GroundState::Airborne);
        assert_eq!(p.derive_behavior(), BehaviorState::Jumping);

        let mut c = Controls::new();
        c.press(Action::Attack);
        p.update(0.0, &c, &[], &tuning);
        assert_eq!(p.derive_behavior(), BehaviorState::Attack);

        for _ in 0..MAX_HEALTH {
            p.hit_cooldown = 0.0;
            p.take_hit(0.0, 1.5, Vec2::ZERO);
        }
        assert!(p.is_dead());
        assert_eq!(p.derive_behavior(), BehaviorState::Die);
        assert_eq!(p.animation.state(), BehaviorState::Die);
    }

    #[test]
    fn reset_restores_health_and_position() {
        let mut p = grounded();
        p.take_hit(0.0, 1.5, Vec2::new(50.0, 30.0));
        p.reset(Vec2::new(50.0, 300.0));
        assert_eq!(p.health(), MAX_HEALTH);
        assert_eq!(p.kin.position, Vec2::new(50.0, 300.0));
        assert!(!p.is_invulnerable());
        assert_eq!(p.behavior(), BehaviorState::Idle);
    }
}
