pub mod physics;
pub mod rect;
pub mod scene;
pub mod time;
