//! WASM exports for the orrery.
//!
//! One `OrreryRunner` lives in a `thread_local!`; every export borrows it.
//! Calls made before `orrery_init` succeeds are no-ops returning defaults.

pub mod runner;

pub use runner::{pointer_to_ndc, OrreryRunner};

use std::cell::RefCell;

use orrery_engine::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut OrreryRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("orrery not initialized; call orrery_init() first");
                None
            }
        }
    })
}

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

/// Build the orrery from a JSON config (empty string for the defaults).
#[wasm_bindgen]
pub fn orrery_init(config_json: &str, now_ms: f64) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = OrreryRunner::from_json(config_json, now_ms)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
    Ok(())
}

/// Run one frame. Returns the simulated days advanced.
#[wasm_bindgen]
pub fn orrery_frame(now_ms: f64) -> f64 {
    with_runner(|r| r.tick(now_ms).delta_days).unwrap_or(0.0)
}

// ---- UI controls ----

#[wasm_bindgen]
pub fn orrery_set_speed(days_per_second: f64) {
    push(InputEvent::SetSpeed(days_per_second));
}

#[wasm_bindgen]
pub fn orrery_set_paused(paused: bool) {
    push(InputEvent::SetPaused(paused));
}

#[wasm_bindgen]
pub fn orrery_toggle_pause() {
    push(InputEvent::TogglePause);
}

/// Returns false for names not in the roster; the camera does not move.
#[wasm_bindgen]
pub fn orrery_focus(name: &str) -> bool {
    with_runner(|r| r.request_focus(name)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn orrery_reset_camera() {
    push(InputEvent::ResetCamera);
}

#[wasm_bindgen]
pub fn orrery_set_orbit_paths_visible(visible: bool) {
    push(InputEvent::SetOrbitPathsVisible(visible));
}

#[wasm_bindgen]
pub fn orrery_set_labels_visible(visible: bool) {
    push(InputEvent::SetLabelsVisible(visible));
}

#[wasm_bindgen]
pub fn orrery_set_axes_visible(visible: bool) {
    push(InputEvent::SetAxesVisible(visible));
}

// ---- Pointer and camera gestures ----

/// Pointer press in canvas pixels.
#[wasm_bindgen]
pub fn orrery_pointer_down(px: f64, py: f64, width: f64, height: f64) {
    let ndc = pointer_to_ndc(px, py, width, height);
    push(InputEvent::PointerDown { x: ndc.x, y: ndc.y });
}

#[wasm_bindgen]
pub fn orrery_orbit(yaw: f64, pitch: f64) {
    push(InputEvent::Orbit { yaw, pitch });
}

#[wasm_bindgen]
pub fn orrery_dolly(factor: f64) {
    push(InputEvent::Dolly { factor });
}

#[wasm_bindgen]
pub fn orrery_pan(dx: f64, dy: f64) {
    push(InputEvent::Pan { dx, dy });
}

#[wasm_bindgen]
pub fn orrery_resize(width: f64, height: f64) {
    push(InputEvent::Resize { width, height });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_bodies_ptr() -> *const f32 {
    with_runner(|r| r.bodies_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_body_count() -> u32 {
    with_runner(|r| r.body_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_orbits_ptr() -> *const f32 {
    with_runner(|r| r.orbits_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_orbit_count() -> u32 {
    with_runner(|r| r.orbit_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_bodies() -> u32 {
    with_runner(|r| r.max_bodies()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_body_names_json() -> String {
    with_runner(|r| r.body_names_json()).unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn get_selection_info() -> String {
    with_runner(|r| r.selection_info()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_focus_target() -> String {
    with_runner(|r| r.focus_target()).unwrap_or_default()
}
