//! Static level layout: platforms, ladders and spawn points.
//!
//! Loaded from JSON or built in code. Nothing here changes after load; the
//! live roster is created from it by `Scene::from_level`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::config::GameConfig;
use crate::api::error::EngineResult;
use crate::core::rect::Rect;

pub const GRASS: [u8; 4] = [34, 139, 34, 255];
pub const WOOD: [u8; 4] = [139, 69, 19, 255];

/// Solid rectangle bodies can stand on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    #[serde(default = "default_platform_color")]
    pub color: [u8; 4],
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            color: GRASS,
        }
    }
}

/// Climbable region. Overlapping it lets the player grab on and move vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    pub rect: Rect,
    #[serde(default = "default_ladder_color")]
    pub color: [u8; 4],
}

impl Ladder {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            color: WOOD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    /// Distance patrolled to the right of `x`.
    pub patrol_width: f32,
    /// Overrides `PhysicsConfig::enemy_speed` for this enemy.
    #[serde(default)]
    pub speed: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcSpawn {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// Complete description of one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDesc {
    /// Horizontal extent in world units; the camera never scrolls past it.
    pub width: f32,
    pub player_spawn: Vec2,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub ladders: Vec<Ladder>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub npcs: Vec<NpcSpawn>,
}

fn default_platform_color() -> [u8; 4] {
    GRASS
}

fn default_ladder_color() -> [u8; 4] {
    WOOD
}

impl LevelDesc {
    /// Parse a level from a JSON string.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let level: LevelDesc = serde_json::from_str(json)?;
        log::info!(
            "level parsed: width {}, {} platforms, {} ladders, {} enemies, {} npcs",
            level.width,
            level.platforms.len(),
            level.ladders.len(),
            level.enemies.len(),
            level.npcs.len()
        );
        Ok(level)
    }

    /// The stock 3000-unit level: a full-width floor, ten floating platforms,
    /// four ladders and six patrolling enemies.
    pub fn default_level(config: &GameConfig) -> Self {
        const WIDTH: f32 = 3000.0;
        let ground = config.ground_line();

        let mut platforms = vec![Platform::new(0.0, ground, WIDTH, config.ground_height)];
        platforms.extend(
            [
                (300.0, 400.0, 200.0),
                (100.0, 300.0, 200.0),
                (500.0, 200.0, 200.0),
                (900.0, 350.0, 200.0),
                (1200.0, 250.0, 200.0),
                (1500.0, 400.0, 200.0),
                (1800.0, 300.0, 200.0),
                (2100.0, 200.0, 200.0),
                (2400.0, 350.0, 200.0),
                (2700.0, 250.0, 300.0),
            ]
            .into_iter()
            .map(|(x, y, w)| Platform::new(x, y, w, 20.0)),
        );

        let ladders = vec![
            Ladder::new(580.0, ground - 380.0, 30.0, 380.0),
            Ladder::new(1300.0, 150.0, 30.0, 350.0),
            Ladder::new(2200.0, 100.0, 30.0, 400.0),
            Ladder::new(2850.0, 150.0, 30.0, 350.0),
        ];

        let enemies = [
            (400.0, ground - 30.0, 200.0),
            (320.0, 370.0, 160.0),
            (920.0, 320.0, 160.0),
            (1520.0, 370.0, 160.0),
            (1820.0, 270.0, 160.0),
            (2420.0, 320.0, 160.0),
        ]
        .into_iter()
        .map(|(x, y, patrol_width)| EnemySpawn {
            x,
            y,
            patrol_width,
            speed: None,
        })
        .collect();

        let npcs = vec![
            NpcSpawn {
                name: "Elder".into(),
                x: 700.0,
                y: ground - 40.0,
            },
            NpcSpawn {
                name: "Merchant".into(),
                x: 1950.0,
                y: ground - 40.0,
            },
        ];

        Self {
            width: WIDTH,
            player_spawn: Vec2::new(50.0, config.window_height / 2.0),
            platforms,
            ladders,
            enemies,
            npcs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_floor_follows_config() {
        let cfg = GameConfig::default();
        let level = LevelDesc::default_level(&cfg);
        let floor = level.platforms[0].rect;
        assert_eq!(floor.top(), 560.0);
        assert_eq!(floor.w, 3000.0);
        assert_eq!(level.platforms.len(), 11);
        assert_eq!(level.ladders.len(), 4);
        assert_eq!(level.enemies.len(), 6);
        // Ground enemy rests exactly on the floor.
        assert_eq!(level.enemies[0].y + 30.0, floor.top());
    }

    #[test]
    fn parse_minimal_level() {
        let json = r#"{
            "width": 1000.0,
            "player_spawn": [10.0, 20.0],
            "platforms": [ { "rect": { "x": 0.0, "y": 540.0, "w": 1000.0, "h": 60.0 } } ],
            "enemies": [ { "x": 500.0, "y": 510.0, "patrol_width": 150.0 } ]
        }"#;
        let level = LevelDesc::from_json(json).unwrap();
        assert_eq!(level.player_spawn, Vec2::new(10.0, 20.0));
        assert_eq!(level.platforms[0].color, GRASS);
        assert_eq!(level.enemies[0].speed, None);
        assert!(level.ladders.is_empty());
        assert!(level.npcs.is_empty());
    }

    #[test]
    fn malformed_level_is_a_config_error() {
        let err = LevelDesc::from_json("{ \"width\": ").unwrap_err();
        assert!(matches!(err, crate::api::error::EngineError::Config(_)));
    }
}
