//! Headless core of a 2D side-scrolling platformer: AABB physics against
//! static platforms, player/enemy/NPC state machines and animation timing.
//!
//! The crate draws nothing. Each step it produces a flat render snapshot
//! (`RenderBuffer`) and a list of `GameEvent`s for the host to consume.

pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod entities;
pub mod input;
pub mod level;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{BodyShape, GameConfig, PhysicsConfig, WorldBounds};
pub use api::error::{EngineError, EngineResult};
pub use api::game::{Game, GameState};
pub use api::types::{EntityId, EventKind, GameEvent, IdAllocator};
pub use assets::frames::{DirectoryFrames, FrameSource};
pub use assets::manifest::AnimationManifest;
pub use assets::registry::SpriteRegistry;
pub use components::animation::Animation;
pub use components::behavior::BehaviorState;
pub use components::kinematics::{Facing, GroundState, Kinematics};
pub use components::sprite::SpriteHandle;
pub use crate::core::physics::{BodyKind, PhysicsComponent, PhysicsEngine, StepReport};
pub use crate::core::rect::Rect;
pub use crate::core::scene::Scene;
pub use crate::core::time::FixedTimestep;
pub use entities::enemy::{Enemy, Patrol};
pub use entities::npc::{Npc, NpcRoster, WanderScript};
pub use entities::player::Player;
pub use input::queue::{Action, Controls, InputEvent, InputQueue};
pub use level::{EnemySpawn, Ladder, LevelDesc, NpcSpawn, Platform};
pub use renderer::camera::Camera2D;
pub use renderer::instance::{InstanceKind, RenderBuffer, RenderInstance};
pub use systems::animation::tick_animations;
pub use systems::debug::{collider_outlines, DebugOutline};
pub use systems::render::build_render_buffer;
