use ledge_engine::{
    build_render_buffer, collider_outlines, Controls, DebugOutline, EngineResult, FixedTimestep,
    Game, GameConfig, GameEvent, GameState, InputEvent, InputQueue, LevelDesc, PhysicsConfig,
    RenderBuffer,
};

/// Wires the engine loop to the browser.
///
/// The host pushes key events as they arrive and calls `tick` once per
/// animation frame with the elapsed seconds. After `tick` the render
/// snapshot and this frame's events are readable through raw pointers.
pub struct GameRunner {
    game: Game,
    input: InputQueue,
    controls: Controls,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    /// Flattened collider outlines, filled only while debug drawing is on.
    debug_outlines: Vec<f32>,
    debug: bool,
}

impl GameRunner {
    pub fn new(config: GameConfig, physics: PhysicsConfig, level: LevelDesc) -> Self {
        let timestep = FixedTimestep::new(config.fixed_dt);
        let mut runner = Self {
            game: Game::new(config, physics, level),
            input: InputQueue::new(),
            controls: Controls::new(),
            render_buffer: RenderBuffer::new(),
            timestep,
            debug_outlines: Vec::new(),
            debug: false,
        };
        runner.rebuild_snapshot();
        runner
    }

    /// Runner over the stock level with default tunables.
    pub fn with_defaults() -> Self {
        let config = GameConfig::default();
        let level = LevelDesc::default_level(&config);
        Self::new(config, PhysicsConfig::default(), level)
    }

    /// Replace the level with one parsed from JSON. The running level is
    /// kept if parsing fails.
    pub fn load_level(&mut self, json: &str) -> EngineResult<()> {
        let level = LevelDesc::from_json(json)?;
        self.game.load_level(level);
        self.timestep.reset();
        self.controls = Controls::new();
        self.rebuild_snapshot();
        Ok(())
    }

    /// Turn collider outlines on or off. Off releases the outline buffer.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
        self.rebuild_snapshot();
    }

    fn rebuild_snapshot(&mut self) {
        build_render_buffer(self.game.scene(), &mut self.render_buffer);
        self.debug_outlines.clear();
        if self.debug {
            for outline in collider_outlines(self.game.physics()) {
                self.debug_outlines.extend_from_slice(&outline.to_floats());
            }
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fold input into controls, take as many fixed steps as
    /// the elapsed time allows, then rebuild the render snapshot.
    pub fn tick(&mut self, dt: f32) {
        self.game.clear_events();

        for event in self.input.drain() {
            self.controls.apply(event);
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(self.timestep.dt(), &self.controls);
            // Edges are consumed by the first step that sees them.
            self.controls.clear_edges();
        }

        self.rebuild_snapshot();
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn events(&self) -> &[GameEvent] {
        self.game.events()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.game.events().as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.game.events().len() as u32
    }

    pub fn debug_outlines(&self) -> &[f32] {
        &self.debug_outlines
    }

    pub fn debug_outlines_ptr(&self) -> *const f32 {
        self.debug_outlines.as_ptr()
    }

    /// Number of outlines, each `DebugOutline::FLOATS` wide.
    pub fn debug_outline_count(&self) -> u32 {
        (self.debug_outlines.len() / DebugOutline::FLOATS) as u32
    }

    // ---- Scalar accessors ----

    /// World x of the view's left edge.
    pub fn camera_x(&self) -> f32 {
        self.game.camera().view_origin().x
    }

    pub fn camera_y(&self) -> f32 {
        self.game.camera().view_origin().y
    }

    pub fn view_width(&self) -> f32 {
        self.game.config().window_width
    }

    pub fn view_height(&self) -> f32 {
        self.game.config().window_height
    }

    pub fn level_width(&self) -> f32 {
        self.game.scene().width
    }

    pub fn health(&self) -> u32 {
        self.game.scene().player.health()
    }

    pub fn max_health(&self) -> u32 {
        self.game.scene().player.max_health()
    }

    /// 0 while playing, 1 on game over.
    pub fn state(&self) -> u32 {
        match self.game.state() {
            GameState::Playing => 0,
            GameState::GameOver => 1,
        }
    }
}
