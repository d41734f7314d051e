//! Axis-aligned platformer physics.
//!
//! Bodies are boxes derived from sprite bounds; platforms are static boxes.
//! There is no rotation, no body-body collision and no solver: each dynamic
//! body is integrated and then pushed out of the platforms it overlaps.

pub mod collision;
pub mod component;
pub mod engine;

pub use collision::{Contacts, Side, LANDING_TOLERANCE, SNAP_EPSILON};
pub use component::{BodyKind, PhysicsComponent};
pub use engine::{
    PhysicsEngine, StepReport, EDGE_PROBE, GROUND_CHECK_DISTANCE, GROUND_TOLERANCE,
    LADDER_EXIT_WINDOW,
};
