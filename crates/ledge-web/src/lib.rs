//! `#[wasm_bindgen]` surface for the platformer core.
//!
//! wasm-bindgen cannot export a struct holding the whole engine by
//! reference, so a single `GameRunner` lives in a `thread_local!` and every
//! export goes through `with_runner`. Calls made before `game_init` are
//! logged and answered with neutral values.

pub mod runner;

use std::cell::RefCell;

use ledge_engine::InputEvent;
use wasm_bindgen::prelude::*;

pub use runner::GameRunner;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => Some(f(runner)),
        None => {
            log::warn!("game not initialized, call game_init() first");
            None
        }
    })
}

#[wasm_bindgen]
pub fn game_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = GameRunner::with_defaults();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("ledge: initialized");
}

/// Load a level from JSON. Returns false and keeps the current level if the
/// JSON is invalid.
#[wasm_bindgen]
pub fn game_load_level(json: &str) -> bool {
    with_runner(|r| match r.load_level(json) {
        Ok(()) => true,
        Err(e) => {
            log::error!("level rejected: {e}");
            false
        }
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

/// Toggle collider outlines for the debug overlay.
#[wasm_bindgen]
pub fn game_set_debug(enabled: bool) {
    with_runner(|r| r.set_debug(enabled));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

/// Outlines are 11 floats each: body kind, then five x/y points forming a closed loop.
#[wasm_bindgen]
pub fn get_debug_outlines_ptr() -> *const f32 {
    with_runner(|r| r.debug_outlines_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_debug_outline_count() -> u32 {
    with_runner(|r| r.debug_outline_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_camera_x() -> f32 {
    with_runner(|r| r.camera_x()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_camera_y() -> f32 {
    with_runner(|r| r.camera_y()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_view_width() -> f32 {
    with_runner(|r| r.view_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_view_height() -> f32 {
    with_runner(|r| r.view_height()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_level_width() -> f32 {
    with_runner(|r| r.level_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_health() -> u32 {
    with_runner(|r| r.health()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_health() -> u32 {
    with_runner(|r| r.max_health()).unwrap_or(0)
}

/// 0 = playing, 1 = game over.
#[wasm_bindgen]
pub fn get_game_state() -> u32 {
    with_runner(|r| r.state()).unwrap_or(0)
}
