pub mod enemy;
pub mod npc;
pub mod player;
