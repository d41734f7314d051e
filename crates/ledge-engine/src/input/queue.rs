/// Raw input events the host pushes between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
}

/// A queue of input events.
/// The host writes events into the queue; the runner drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Logical game actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Attack,
    Interact,
    Restart,
}

impl Action {
    const COUNT: usize = 8;

    /// Default keyboard binding: arrows or WASD, Space, X, E and Enter.
    pub fn from_key_code(key_code: u32) -> Option<Action> {
        match key_code {
            37 | 65 => Some(Action::Left),
            39 | 68 => Some(Action::Right),
            38 | 87 => Some(Action::Up),
            40 | 83 => Some(Action::Down),
            32 => Some(Action::Jump),
            88 => Some(Action::Attack),
            69 => Some(Action::Interact),
            13 => Some(Action::Restart),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-frame action state: what is held, and what went down since the last
/// `clear_edges`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls {
    held: [bool; Action::COUNT],
    pressed: [bool; Action::COUNT],
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one input event in. Unbound keys are ignored.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key_code } => {
                if let Some(action) = Action::from_key_code(key_code) {
                    self.press(action);
                }
            }
            InputEvent::KeyUp { key_code } => {
                if let Some(action) = Action::from_key_code(key_code) {
                    self.release(action);
                }
            }
        }
    }

    /// Mark an action held. Key repeat does not produce a second edge.
    pub fn press(&mut self, action: Action) {
        let i = action.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    pub fn held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// True on the first step after the action went down.
    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    /// -1.0 for left, +1.0 for right, 0.0 for neither or both.
    pub fn axis_x(&self) -> f32 {
        match (self.held(Action::Left), self.held(Action::Right)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Forget press edges. Called once per fixed step after the game consumed them.
    pub fn clear_edges(&mut self) {
        self.pressed = [false; Action::COUNT];
    }
}
