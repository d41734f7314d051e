//! Platform contact resolution for one body.

use glam::Vec2;

use crate::api::config::BodyShape;
use crate::components::kinematics::{GroundState, Kinematics};
use crate::core::physics::component::PhysicsComponent;
use crate::core::rect::Rect;

/// How far below a platform top the previous bottom may sit and still count
/// as landing on it (and likewise for ceiling hits).
pub const LANDING_TOLERANCE: f32 = 5.0;
/// Gap left between a resolved body and the surface it was pushed against.
pub const SNAP_EPSILON: f32 = 0.1;

/// Which side of the body struck a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Side-collision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideResponse {
    /// Always push the body out.
    Block,
    /// Push out unless the body is moving upward (one-way platforms).
    BlockUnlessRising,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contacts {
    pub landed: bool,
    pub ceiling: bool,
    pub side: Option<Side>,
}

/// A body being moved this step: kinematics plus what is needed to derive
/// its collision box.
pub(crate) struct Mover<'a> {
    pub kin: &'a mut Kinematics,
    pub size: Vec2,
    pub shape: BodyShape,
}

impl Mover<'_> {
    pub fn collision_box(&self) -> Rect {
        self.shape.collision_box(self.kin.bounds(self.size))
    }

    pub fn set_box_bottom(&mut self, bottom: f32) {
        let dy = bottom - self.collision_box().bottom();
        self.kin.translate(Vec2::new(0.0, dy));
    }

    pub fn set_box_top(&mut self, top: f32) {
        let dy = top - self.collision_box().top();
        self.kin.translate(Vec2::new(0.0, dy));
    }

    pub fn set_box_left(&mut self, left: f32) {
        let dx = left - self.collision_box().left();
        self.kin.translate(Vec2::new(dx, 0.0));
    }

    pub fn set_box_right(&mut self, right: f32) {
        let dx = right - self.collision_box().right();
        self.kin.translate(Vec2::new(dx, 0.0));
    }

    /// Settle on a surface: bottom flush with `top`, vertical speed zeroed.
    pub fn land_on(&mut self, top: f32) {
        self.set_box_bottom(top - SNAP_EPSILON);
        self.kin.resolve_vertical(0.0);
        self.kin.set_ground(GroundState::OnGround);
    }
}

/// Rules that differ between body kinds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolveRules {
    pub one_way: bool,
    pub side: Option<SideResponse>,
    pub friction: bool,
}

/// Resolve the moved body against every platform it now overlaps.
///
/// `prev` is the collision box before this step's integration; it decides
/// whether an overlap counts as a landing, a ceiling hit or a side hit.
pub(crate) fn resolve_platforms(
    mover: &mut Mover<'_>,
    prev: Rect,
    platforms: &[PhysicsComponent],
    rules: ResolveRules,
) -> Contacts {
    let mut contacts = Contacts::default();

    for platform in platforms {
        let p = platform.collision_box;
        if !mover.collision_box().intersects(&p) {
            continue;
        }
        let v = mover.kin.velocity();

        if v.y > 0.0 && prev.bottom() <= p.top() + LANDING_TOLERANCE {
            mover.land_on(p.top());
            if rules.friction {
                mover.kin.damp_horizontal(1.0 - platform.friction);
            }
            contacts.landed = true;
        } else if v.y < 0.0 && prev.top() >= p.bottom() - LANDING_TOLERANCE {
            if !rules.one_way {
                mover.set_box_top(p.bottom() + SNAP_EPSILON);
                mover.kin.resolve_vertical(-v.y * mover.shape.bounce_factor);
                contacts.ceiling = true;
            }
        } else if let Some(response) = rules.side {
            if response == SideResponse::BlockUnlessRising && rules.one_way && v.y < 0.0 {
                continue;
            }
            let straddles = prev.bottom() > p.top() + LANDING_TOLERANCE
                && prev.top() < p.bottom() - LANDING_TOLERANCE;
            if v.y != 0.0 && !straddles {
                continue;
            }
            // Only an edge the previous box was clear of can be struck. A body
            // already inside the platform's span is left where it is. The
            // epsilon keeps a body resting flush against a wall blocked.
            if prev.right() <= p.left() + SNAP_EPSILON {
                mover.set_box_right(p.left());
                contacts.side = Some(Side::Right);
            } else if prev.left() >= p.right() - SNAP_EPSILON {
                mover.set_box_left(p.right());
                contacts.side = Some(Side::Left);
            }
        }
    }

    contacts
}
