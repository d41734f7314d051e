pub mod animation;
pub mod behavior;
pub mod kinematics;
pub mod sprite;
