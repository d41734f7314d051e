use serde::{Deserialize, Serialize};

/// Behavior tag shared by every animated entity kind.
/// NPCs only ever use `Idle`, `Walking` and `Interacting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorState {
    #[default]
    Idle,
    Walking,
    Jumping,
    Attack,
    GetHit,
    Die,
    Interacting,
}

impl BehaviorState {
    pub const ALL: [BehaviorState; 7] = [
        BehaviorState::Idle,
        BehaviorState::Walking,
        BehaviorState::Jumping,
        BehaviorState::Attack,
        BehaviorState::GetHit,
        BehaviorState::Die,
        BehaviorState::Interacting,
    ];

    /// Whether the animation for this state wraps around.
    pub fn loops(self) -> bool {
        match self {
            BehaviorState::Idle | BehaviorState::Walking | BehaviorState::Interacting => true,
            BehaviorState::Jumping
            | BehaviorState::Attack
            | BehaviorState::GetHit
            | BehaviorState::Die => false,
        }
    }

    /// Directory name used by animation manifests ("idle", "get_hit", ...).
    pub fn name(self) -> &'static str {
        match self {
            BehaviorState::Idle => "idle",
            BehaviorState::Walking => "walking",
            BehaviorState::Jumping => "jumping",
            BehaviorState::Attack => "attack",
            BehaviorState::GetHit => "get_hit",
            BehaviorState::Die => "die",
            BehaviorState::Interacting => "interacting",
        }
    }
}
