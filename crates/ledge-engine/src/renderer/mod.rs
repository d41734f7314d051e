pub mod camera;
pub mod instance;

pub use camera::Camera2D;
pub use instance::{InstanceKind, RenderBuffer, RenderInstance};
