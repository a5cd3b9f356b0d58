//! Cursor Ribbon - Wasm Core
//!
//! A ribbon mesh of chained rigid bones that bends to follow the pointer
//! in 3D. The chain/geometry core is plain testable Rust; rendering and
//! input capture stay in the host, which drives `update_ribbon_frame`
//! once per rendered frame.

#[cfg(target_arch = "wasm32")]
mod bench;
pub mod buffers;
pub mod camera;
pub mod chain;
pub mod config;
pub mod geometry;

#[cfg(target_arch = "wasm32")]
pub mod gpu;
pub mod state;
pub mod target;

use wasm_bindgen::prelude::*;

/// Small epsilon value for floating-point comparisons
pub const EPSILON: f32 = 1e-6;

#[cfg(target_arch = "wasm32")]
pub use bench::run_benchmarks;

// Re-exports for WASM API
#[cfg(target_arch = "wasm32")]
pub use camera::{get_camera_right_axis, rotate_camera, update_camera};

#[cfg(target_arch = "wasm32")]
pub use gpu::{init_gpu, render_frame, resize_surface};

pub use buffers::{MeshBuffers, RibbonVertex};
pub use chain::{Bone, Chain, SkinPoint};
pub use config::{ConfigError, RibbonConfig};
pub use glam::Vec3;

/// One-time logging setup; a no-op outside the browser
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            console_log::init_with_level(log::Level::Info).ok();
        }
    }
}

/// Build the ribbon from a JS config object (camelCase keys; missing
/// fields fall back to the demo defaults). Replaces any previous ribbon:
/// topology can only change through a full rebuild.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_ribbon(config: JsValue) -> Result<(), JsValue> {
    init_logging();

    let config: RibbonConfig = if config.is_undefined() || config.is_null() {
        RibbonConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
    };

    let app = state::AppState::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!(
        "Ribbon initialized: {} bones, {} vertices",
        app.chain.bones().len(),
        app.chain.vertex_count()
    );
    state::initialize_app_state(app);
    Ok(())
}

/// Build the ribbon from a bundled preset ("default", "dense", "wide")
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_ribbon_preset(name: &str) -> Result<(), JsValue> {
    init_logging();

    let config = RibbonConfig::preset(name)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown preset: {}", name)))?;

    let app = state::AppState::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    state::initialize_app_state(app);
    Ok(())
}

/// Record the latest pointer position in normalized device coordinates
/// (x, y in [-1, 1]). Written from the host's input handler; the next
/// frame picks it up.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_pointer(ndc_x: f32, ndc_y: f32) {
    state::with_app_state_mut(|app| app.pointer.set_ndc(ndc_x, ndc_y));
}

/// Advance the ribbon one frame: project the pointer into world space,
/// cascade the chain after it, scatter the vertex buffers, and re-upload
/// their contents to the GPU. Call exactly once per rendered frame,
/// before render_frame().
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn update_ribbon_frame() {
    state::with_app_state_mut(|app| app.update_frame());
    gpu::upload_mesh_buffers();
}

/// Current flat position buffer (x, y, z per vertex), for JS renderers
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn get_positions() -> Vec<f32> {
    state::with_app_state(|app| app.buffers.positions().to_vec()).unwrap_or_default()
}

/// Current flat normal buffer, same indexing as the positions
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn get_normals() -> Vec<f32> {
    state::with_app_state(|app| app.buffers.normals().to_vec()).unwrap_or_default()
}

/// Triangle index buffer; fixed after init_ribbon, upload it once
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn get_indices() -> Vec<u32> {
    state::with_app_state(|app| app.triangle_indices.clone()).unwrap_or_default()
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(msg: &str) {
    log::info!("{}", msg);
}
