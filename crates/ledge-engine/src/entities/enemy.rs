use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::animation::Animation;
use crate::components::behavior::BehaviorState;
use crate::components::kinematics::{Facing, Kinematics};
use crate::core::rect::Rect;

pub const ENEMY_SIZE: Vec2 = Vec2::new(30.0, 30.0);
/// Distance from the start point, as a multiple of the patrol width, past
/// which an enemy is teleported home.
const LEASH_FACTOR: f32 = 1.5;

/// Patrol direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patrol {
    #[default]
    MovingRight,
    MovingLeft,
}

impl Patrol {
    pub fn sign(self) -> f32 {
        match self {
            Patrol::MovingRight => 1.0,
            Patrol::MovingLeft => -1.0,
        }
    }

    fn facing(self) -> Facing {
        match self {
            Patrol::MovingRight => Facing::Right,
            Patrol::MovingLeft => Facing::Left,
        }
    }
}

/// A ground enemy walking back and forth over `[start_x, start_x + patrol_width]`.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub kin: Kinematics,
    pub size: Vec2,
    pub animation: Animation,
    pub start_x: f32,
    pub patrol_width: f32,
    /// Patrol speed in px/s.
    pub speed: f32,
    patrol: Patrol,
}

impl Enemy {
    pub fn new(id: EntityId, position: Vec2, patrol_width: f32, speed: f32) -> Self {
        let mut enemy = Self {
            id,
            kin: Kinematics::at(position),
            size: ENEMY_SIZE,
            animation: Animation::default(),
            start_x: position.x,
            patrol_width,
            speed,
            patrol: Patrol::MovingRight,
        };
        enemy.sync_velocity();
        enemy
    }

    pub fn bounds(&self) -> Rect {
        self.kin.bounds(self.size)
    }

    pub fn patrol(&self) -> Patrol {
        self.patrol
    }

    /// Right end of the patrol range.
    pub fn end_x(&self) -> f32 {
        self.start_x + self.patrol_width
    }

    /// Turn around at the patrol bounds and set horizontal velocity.
    ///
    /// An enemy found further than 1.5 patrol widths from its start (pushed
    /// by collisions, or fallen off its platform) is put back at `start_x`.
    pub fn update_patrol(&mut self) {
        let x = self.kin.position.x;
        if (x - self.start_x).abs() > self.patrol_width * LEASH_FACTOR {
            log::debug!("enemy {:?} strayed to x={x}, returning to {}", self.id, self.start_x);
            self.kin.position.x = self.start_x;
            self.patrol = Patrol::MovingRight;
        } else {
            match self.patrol {
                Patrol::MovingRight if x >= self.end_x() => self.patrol = Patrol::MovingLeft,
                Patrol::MovingLeft if x <= self.start_x => self.patrol = Patrol::MovingRight,
                _ => {}
            }
        }
        self.sync_velocity();
    }

    /// Force a patrol direction. Used by wall hits and the edge probe.
    pub fn reverse(&mut self, patrol: Patrol) {
        if self.patrol != patrol {
            log::debug!("enemy {:?} reversing to {:?}", self.id, patrol);
        }
        self.patrol = patrol;
        self.sync_velocity();
    }

    /// Make horizontal velocity and facing agree with the patrol direction.
    pub fn sync_velocity(&mut self) {
        let desired = self.patrol.sign() * self.speed;
        if self.kin.velocity().x != desired {
            self.kin.drive_horizontal(desired);
        }
        self.kin.face(self.patrol.facing());
    }

    pub fn derive_behavior(&mut self) -> BehaviorState {
        let state = if self.kin.velocity().x != 0.0 {
            BehaviorState::Walking
        } else {
            BehaviorState::Idle
        };
        self.animation.set_state(state);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy() -> Enemy {
        Enemy::new(EntityId(2), Vec2::new(500.0, 510.0), 150.0, 120.0)
    }

    #[test]
    fn starts_moving_right() {
        let e = enemy();
        assert_eq!(e.patrol(), Patrol::MovingRight);
        assert_eq!(e.kin.velocity().x, 120.0);
        assert_eq!(e.kin.facing, Facing::Right);
    }

    #[test]
    fn turns_at_right_bound() {
        let mut e = enemy();
        e.kin.position.x = 650.0;
        e.update_patrol();
        assert_eq!(e.patrol(), Patrol::MovingLeft);
        assert!(e.kin.velocity().x < 0.0);
        assert!(e.kin.facing.is_left());
    }

    #[test]
    fn turns_at_left_bound() {
        let mut e = enemy();
        e.reverse(Patrol::MovingLeft);
        e.kin.position.x = 499.0;
        e.update_patrol();
        assert_eq!(e.patrol(), Patrol::MovingRight);
        assert!(e.kin.velocity().x > 0.0);
    }

    #[test]
    fn leash_returns_stray_enemy() {
        let mut e = enemy();
        e.reverse(Patrol::MovingLeft);
        e.kin.position.x = 500.0 + 150.0 * 1.5 + 1.0;
        e.update_patrol();
        assert_eq!(e.kin.position.x, 500.0);
        assert_eq!(e.patrol(), Patrol::MovingRight);
    }

    #[test]
    fn sync_fixes_sign_after_damping() {
        let mut e = enemy();
        e.kin.damp_horizontal(0.7);
        e.sync_velocity();
        assert_eq!(e.kin.velocity().x, 120.0);
    }
}
