use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::api::error::EngineResult;
use crate::assets::frames::FrameSource;
use crate::components::animation::{Animation, DEFAULT_FRAME_TIME};
use crate::components::behavior::BehaviorState;
use crate::core::scene::Scene;

/// Animation manifest: which frame directory backs each behavior state of
/// each entity kind. Loaded from a JSON file at runtime.
///
/// ```json
/// { "root": "assets", "player": { "idle": "player/idle", "get_hit": "player/hurt" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationManifest {
    /// Directory the per-state paths are relative to.
    #[serde(default)]
    pub root: PathBuf,
    /// Seconds per frame for every animation.
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
    #[serde(default)]
    pub player: HashMap<BehaviorState, PathBuf>,
    #[serde(default)]
    pub enemy: HashMap<BehaviorState, PathBuf>,
    #[serde(default)]
    pub npc: HashMap<BehaviorState, PathBuf>,
}

fn default_frame_time() -> f32 {
    DEFAULT_FRAME_TIME
}

impl AnimationManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build one animation set from a state → directory table. States whose
    /// directory fails to load are left without frames.
    pub fn build(&self, dirs: &HashMap<BehaviorState, PathBuf>, source: &mut impl FrameSource) -> Animation {
        let mut animation = Animation::new(self.frame_time);
        for state in BehaviorState::ALL {
            if let Some(dir) = dirs.get(&state) {
                animation.load_state(state, &self.root.join(dir), source);
            }
        }
        animation
    }

    /// Give every entity in the scene its kind's animation set. Each
    /// directory is read once per kind and shared by all entities of it,
    /// including ones spawned later.
    pub fn apply(&self, scene: &mut Scene, source: &mut impl FrameSource) {
        let player = self.build(&self.player, source);
        let enemy = self.build(&self.enemy, source);
        let npc = self.build(&self.npc, source);

        scene.player.animation = player;
        for e in &mut scene.enemies {
            e.animation = enemy.clone();
        }
        for n in scene.npcs.iter_mut() {
            n.animation = npc.clone();
        }
        scene.enemy_animation = enemy;
        scene.npc_animation = npc;
        log::info!(
            "animations applied: player {} states, enemy {} states, npc {} states",
            self.player.len(),
            self.enemy.len(),
            self.npc.len()
        );
    }
}
