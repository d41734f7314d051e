//! Per-entity animation timing.
//!
//! Each entity owns one `Animation` holding a frame list per behavior state.
//! Switching state restarts playback and takes the loop flag from
//! `BehaviorState::loops`.

use std::collections::HashMap;
use std::path::Path;

use crate::assets::frames::FrameSource;
use crate::components::behavior::BehaviorState;
use crate::components::sprite::SpriteHandle;

/// Default seconds per frame.
pub const DEFAULT_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Animation {
    frames: HashMap<BehaviorState, Vec<SpriteHandle>>,
    /// Seconds each frame is displayed.
    pub frame_time: f32,
    state: BehaviorState,
    frame_index: usize,
    timer: f32,
    looping: bool,
    playing: bool,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            frames: HashMap::new(),
            frame_time: DEFAULT_FRAME_TIME,
            state: BehaviorState::Idle,
            frame_index: 0,
            timer: 0.0,
            looping: BehaviorState::Idle.loops(),
            playing: true,
        }
    }
}

impl Animation {
    pub fn new(frame_time: f32) -> Self {
        Self {
            frame_time,
            ..Default::default()
        }
    }

    /// Install the frame list for a state. An empty list removes the state.
    pub fn set_frames(&mut self, state: BehaviorState, frames: Vec<SpriteHandle>) {
        if frames.is_empty() {
            self.frames.remove(&state);
        } else {
            self.frames.insert(state, frames);
        }
    }

    /// Load a state's frames from a directory.
    ///
    /// Failure is logged and leaves the state without frames; the rest of the
    /// entity's animation set is unaffected. Returns whether frames were loaded.
    pub fn load_state(&mut self, state: BehaviorState, dir: &Path, source: &mut impl FrameSource) -> bool {
        match source.frames_for(dir) {
            Ok(frames) => {
                log::debug!("loaded {} frames for {:?} from {}", frames.len(), state, dir.display());
                self.set_frames(state, frames);
                true
            }
            Err(e) => {
                log::warn!("animation {:?} unavailable: {}", state, e);
                self.frames.remove(&state);
                false
            }
        }
    }

    pub fn has_animation(&self, state: BehaviorState) -> bool {
        self.frames.get(&state).is_some_and(|f| !f.is_empty())
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Switch to a new state. Same state is a no-op so playback continues.
    pub fn set_state(&mut self, state: BehaviorState) {
        if state == self.state {
            return;
        }
        self.state = state;
        self.looping = state.loops();
        self.reset();
    }

    /// Restart the current state from frame 0.
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.timer = 0.0;
        self.playing = true;
    }

    /// Advance by dt seconds. Returns true if the frame changed.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.playing || self.frame_time <= 0.0 {
            return false;
        }
        let count = match self.frames.get(&self.state) {
            Some(frames) if !frames.is_empty() => frames.len(),
            _ => return false,
        };

        self.timer += dt;
        let mut changed = false;

        while self.timer >= self.frame_time {
            self.timer -= self.frame_time;
            self.frame_index += 1;
            changed = true;

            if self.frame_index >= count {
                if self.looping {
                    self.frame_index = 0;
                } else {
                    self.frame_index = count - 1;
                    self.playing = false;
                    break;
                }
            }
        }

        changed
    }

    /// True once a non-looping state has shown its last frame.
    pub fn is_finished(&self) -> bool {
        match self.frames.get(&self.state) {
            Some(frames) if !self.looping && !frames.is_empty() => {
                !self.playing && self.frame_index >= frames.len() - 1
            }
            _ => false,
        }
    }

    /// Sprite for the current frame. `None` means draw the placeholder.
    pub fn current_sprite(&self) -> Option<SpriteHandle> {
        let frames = self.frames.get(&self.state)?;
        frames
            .get(self.frame_index.min(frames.len().saturating_sub(1)))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::{EngineError, EngineResult};
    use std::path::PathBuf;

    fn handles(n: u32) -> Vec<SpriteHandle> {
        (0..n).map(SpriteHandle).collect()
    }

    #[test]
    fn looping_animation_wraps() {
        let mut anim = Animation::new(0.1);
        anim.set_frames(BehaviorState::Idle, handles(3));

        anim.update(0.35);
        assert_eq!(anim.frame_index(), 0);
        assert!(!anim.is_finished());
        assert!(anim.is_playing());
    }

    #[test]
    fn non_looping_animation_clamps() {
        let mut anim = Animation::new(0.1);
        anim.set_frames(BehaviorState::Attack, handles(3));
        anim.set_state(BehaviorState::Attack);
        assert!(!anim.is_looping());

        anim.update(0.35);
        assert_eq!(anim.frame_index(), 2);
        assert!(anim.is_finished());
        assert_eq!(anim.current_sprite(), Some(SpriteHandle(2)));

        // Further updates stay on the last frame.
        assert!(!anim.update(1.0));
        assert_eq!(anim.frame_index(), 2);
    }

    #[test]
    fn single_step_advances_one_frame() {
        let mut anim = Animation::new(0.1);
        anim.set_frames(BehaviorState::Walking, handles(4));
        anim.set_state(BehaviorState::Walking);

        assert!(!anim.update(0.05));
        assert!(anim.update(0.1));
        assert_eq!(anim.frame_index(), 1);
        assert_eq!(anim.current_sprite(), Some(SpriteHandle(1)));
    }

    #[test]
    fn state_change_resets_timer_and_index() {
        let mut anim = Animation::new(0.1);
        anim.set_frames(BehaviorState::Idle, handles(4));
        anim.set_frames(BehaviorState::Jumping, handles(2));
        anim.update(0.25);
        assert_eq!(anim.frame_index(), 2);

        anim.set_state(BehaviorState::Idle);
        assert_eq!(anim.frame_index(), 2, "same state must not restart");

        anim.set_state(BehaviorState::Jumping);
        assert_eq!(anim.frame_index(), 0);
        assert!(!anim.is_looping());
        // Leftover 0.05s from the idle cycle must not carry over.
        assert!(!anim.update(0.06));
    }

    #[test]
    fn missing_state_falls_back_to_placeholder() {
        let mut anim = Animation::new(0.1);
        anim.set_frames(BehaviorState::Idle, handles(2));
        anim.set_state(BehaviorState::Die);
        assert!(!anim.has_animation(BehaviorState::Die));
        assert_eq!(anim.current_sprite(), None);
        assert!(!anim.update(1.0));
        assert!(!anim.is_finished());
    }

    struct FailingSource;

    impl FrameSource for FailingSource {
        fn frames_for(&mut self, dir: &Path) -> EngineResult<Vec<SpriteHandle>> {
            Err(EngineError::AnimationDirMissing(dir.to_path_buf()))
        }
    }

    struct FixedSource(Vec<SpriteHandle>);

    impl FrameSource for FixedSource {
        fn frames_for(&mut self, _dir: &Path) -> EngineResult<Vec<SpriteHandle>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn failed_load_leaves_other_states_intact() {
        let mut anim = Animation::default();
        assert!(anim.load_state(BehaviorState::Idle, &PathBuf::from("idle"), &mut FixedSource(handles(2))));
        assert!(!anim.load_state(BehaviorState::Walking, &PathBuf::from("walk"), &mut FailingSource));
        assert!(anim.has_animation(BehaviorState::Idle));
        assert!(!anim.has_animation(BehaviorState::Walking));
    }
}
