//! Non-player characters and the roster that owns them.
//!
//! NPCs are static for physics: the engine only settles them vertically.
//! Their own movement is a scripted wander driven by per-NPC timers.

use glam::Vec2;

use crate::api::types::{EntityId, IdAllocator};
use crate::components::animation::Animation;
use crate::components::behavior::BehaviorState;
use crate::components::kinematics::{Facing, Kinematics};
use crate::core::rect::Rect;

pub const NPC_SIZE: Vec2 = Vec2::new(30.0, 40.0);
pub const MAX_NPC_HEALTH: f32 = 100.0;

/// Timings and speed of the scripted wander.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderScript {
    /// Seconds spent idle before walking.
    pub idle_time: f32,
    /// Seconds spent walking before idling again.
    pub walk_time: f32,
    /// Walking speed in px/s.
    pub walk_speed: f32,
    /// Seconds an interaction lasts.
    pub interact_time: f32,
}

impl Default for WanderScript {
    fn default() -> Self {
        Self {
            idle_time: 2.0,
            walk_time: 1.5,
            walk_speed: 40.0,
            interact_time: 3.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Npc {
    pub id: EntityId,
    pub name: String,
    pub kin: Kinematics,
    pub size: Vec2,
    pub animation: Animation,
    pub active: bool,
    health: f32,
    behavior: BehaviorState,
    state_timer: f32,
    walk_dir: Facing,
}

impl Npc {
    pub fn new(id: EntityId, name: impl Into<String>, position: Vec2) -> Self {
        Self {
            id,
            name: name.into(),
            kin: Kinematics::at(position),
            size: NPC_SIZE,
            animation: Animation::default(),
            active: true,
            health: MAX_NPC_HEALTH,
            behavior: BehaviorState::Idle,
            state_timer: 0.0,
            walk_dir: Facing::Right,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.kin.bounds(self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn behavior(&self) -> BehaviorState {
        self.behavior
    }

    fn enter(&mut self, behavior: BehaviorState) {
        self.behavior = behavior;
        self.state_timer = 0.0;
        self.animation.set_state(behavior);
    }

    /// Advance the wander script by `dt`.
    pub fn update(&mut self, dt: f32, script: &WanderScript) {
        if !self.active {
            return;
        }
        self.state_timer += dt;

        match self.behavior {
            BehaviorState::Idle if self.state_timer >= script.idle_time => {
                self.walk_dir = match self.walk_dir {
                    Facing::Left => Facing::Right,
                    Facing::Right => Facing::Left,
                };
                self.kin.face(self.walk_dir);
                self.enter(BehaviorState::Walking);
            }
            BehaviorState::Walking => {
                self.kin.position.x += self.walk_dir.sign() * script.walk_speed * dt;
                if self.state_timer >= script.walk_time {
                    self.enter(BehaviorState::Idle);
                }
            }
            BehaviorState::Interacting if self.state_timer >= script.interact_time => {
                self.enter(BehaviorState::Idle);
            }
            _ => {}
        }
    }
}

/// Owns every NPC in the level. Lookups go by `EntityId`.
#[derive(Debug, Clone, Default)]
pub struct NpcRoster {
    npcs: Vec<Npc>,
    pub script: WanderScript,
}

impl NpcRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an NPC at `(x, y)` with full health. Returns its id.
    pub fn add(&mut self, ids: &mut IdAllocator, name: &str, x: f32, y: f32) -> EntityId {
        let id = ids.next_id();
        self.npcs.push(Npc::new(id, name, Vec2::new(x, y)));
        log::debug!("npc {name} spawned as {id:?}");
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Npc> {
        let idx = self.npcs.iter().position(|n| n.id == id)?;
        Some(self.npcs.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Npc> {
        self.npcs.iter_mut().find(|n| n.id == id)
    }

    pub fn set_position(&mut self, id: EntityId, x: f32, y: f32) {
        if let Some(npc) = self.get_mut(id) {
            npc.kin.position = Vec2::new(x, y);
        }
    }

    /// Force a behavior. Only `Idle`, `Walking` and `Interacting` apply to NPCs;
    /// anything else is ignored.
    pub fn set_behavior(&mut self, id: EntityId, behavior: BehaviorState) {
        if !matches!(
            behavior,
            BehaviorState::Idle | BehaviorState::Walking | BehaviorState::Interacting
        ) {
            log::warn!("npc {id:?}: behavior {behavior:?} not supported, ignored");
            return;
        }
        if let Some(npc) = self.get_mut(id) {
            npc.enter(behavior);
        }
    }

    /// Set health, clamped to [0, 100].
    pub fn set_health(&mut self, id: EntityId, health: f32) {
        if let Some(npc) = self.get_mut(id) {
            npc.health = health.clamp(0.0, MAX_NPC_HEALTH);
        }
    }

    pub fn set_active(&mut self, id: EntityId, active: bool) {
        if let Some(npc) = self.get_mut(id) {
            npc.active = active;
        }
    }

    /// Ids of active NPCs whose center lies within `radius` of `point`.
    pub fn in_range(&self, point: Vec2, radius: f32) -> Vec<EntityId> {
        let r2 = radius * radius;
        self.npcs
            .iter()
            .filter(|n| n.active && n.center().distance_squared(point) <= r2)
            .map(|n| n.id)
            .collect()
    }

    pub fn nearest_in_range(&self, point: Vec2, radius: f32) -> Option<EntityId> {
        let r2 = radius * radius;
        self.npcs
            .iter()
            .filter(|n| n.active)
            .map(|n| (n.id, n.center().distance_squared(point)))
            .filter(|(_, d2)| *d2 <= r2)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Advance every active NPC's wander script.
    pub fn update(&mut self, dt: f32) {
        let script = self.script;
        for npc in &mut self.npcs {
            npc.update(dt, &script);
        }
    }

    /// Start an interaction if the NPC is active and within `range` of the
    /// player. The NPC stops and turns toward the player.
    pub fn interact(&mut self, id: EntityId, player_center: Vec2, range: f32) -> bool {
        let Some(npc) = self.get_mut(id) else {
            return false;
        };
        if !npc.active || npc.center().distance_squared(player_center) > range * range {
            return false;
        }
        let facing = if player_center.x < npc.center().x {
            Facing::Left
        } else {
            Facing::Right
        };
        npc.kin.face(facing);
        npc.enter(BehaviorState::Interacting);
        log::debug!("npc {} interacting", npc.name);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Npc> {
        self.npcs.iter_mut()
    }

    pub fn as_slice(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn as_mut_slice(&mut self) -> &mut [Npc] {
        &mut self.npcs
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> (NpcRoster, IdAllocator) {
        (NpcRoster::new(), IdAllocator::new())
    }

    #[test]
    fn add_and_remove() {
        let (mut r, mut ids) = roster();
        let a = r.add(&mut ids, "Elder", 100.0, 520.0);
        let b = r.add(&mut ids, "Merchant", 300.0, 520.0);
        assert_ne!(a, b);
        assert_eq!(r.len(), 2);
        assert_eq!(r.remove(a).map(|n| n.name), Some("Elder".to_string()));
        assert!(r.get(a).is_none());
        assert!(r.remove(a).is_none());
        assert_eq!(r.get(b).map(|n| n.health()), Some(100.0));
    }

    #[test]
    fn health_is_clamped() {
        let (mut r, mut ids) = roster();
        let id = r.add(&mut ids, "Elder", 0.0, 0.0);
        r.set_health(id, 150.0);
        assert_eq!(r.get(id).unwrap().health(), 100.0);
        r.set_health(id, -5.0);
        assert_eq!(r.get(id).unwrap().health(), 0.0);
    }

    #[test]
    fn range_queries_skip_inactive() {
        let (mut r, mut ids) = roster();
        let near = r.add(&mut ids, "Near", 100.0, 500.0);
        let far = r.add(&mut ids, "Far", 400.0, 500.0);
        let hidden = r.add(&mut ids, "Hidden", 110.0, 500.0);
        r.set_active(hidden, false);

        let origin = Vec2::new(115.0, 520.0);
        assert_eq!(r.in_range(origin, 60.0), vec![near]);
        assert_eq!(r.nearest_in_range(origin, 1000.0), Some(near));
        assert!(r.in_range(origin, 1000.0).contains(&far));
    }

    #[test]
    fn wander_alternates_idle_and_walk() {
        let (mut r, mut ids) = roster();
        let id = r.add(&mut ids, "Elder", 100.0, 520.0);

        r.update(2.0);
        assert_eq!(r.get(id).unwrap().behavior(), BehaviorState::Walking);

        r.update(1.0);
        let walked = r.get(id).unwrap().kin.position.x;
        assert!((walked - 60.0).abs() < 1e-3, "walked left to {walked}");

        r.update(0.5);
        assert_eq!(r.get(id).unwrap().behavior(), BehaviorState::Idle);
    }

    #[test]
    fn inactive_npcs_do_not_update() {
        let (mut r, mut ids) = roster();
        let id = r.add(&mut ids, "Elder", 100.0, 520.0);
        r.set_active(id, false);
        r.update(5.0);
        assert_eq!(r.get(id).unwrap().behavior(), BehaviorState::Idle);
    }

    #[test]
    fn interaction_needs_range_and_times_out() {
        let (mut r, mut ids) = roster();
        let id = r.add(&mut ids, "Elder", 100.0, 520.0);

        assert!(!r.interact(id, Vec2::new(400.0, 540.0), 60.0));
        assert!(r.interact(id, Vec2::new(80.0, 540.0), 60.0));
        let npc = r.get(id).unwrap();
        assert_eq!(npc.behavior(), BehaviorState::Interacting);
        assert!(npc.kin.facing.is_left());

        r.update(3.0);
        assert_eq!(r.get(id).unwrap().behavior(), BehaviorState::Idle);
    }

    #[test]
    fn unsupported_behavior_is_ignored() {
        let (mut r, mut ids) = roster();
        let id = r.add(&mut ids, "Elder", 100.0, 520.0);
        r.set_behavior(id, BehaviorState::Attack);
        assert_eq!(r.get(id).unwrap().behavior(), BehaviorState::Idle);
        r.set_behavior(id, BehaviorState::Walking);
        assert_eq!(r.get(id).unwrap().behavior(), BehaviorState::Walking);
    }
}
