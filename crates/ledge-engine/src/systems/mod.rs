pub mod animation;
pub mod debug;
pub mod render;
