use crate::buffers::MeshBuffers;
use crate::chain::Chain;
use crate::config::RibbonConfig;
use crate::geometry::PlaneGrid;
use glam::Vec3;
use wasm_bindgen::prelude::*;

#[derive(serde::Serialize)]
pub struct BenchmarkResults {
    pub iterations: i32,
    pub follow_ms: f64,
    pub scatter_ms: f64,
    pub frame_ms: f64,
    pub bones: usize,
    pub vertices: usize,
}

/// Deterministic swirling target, no clock or RNG involved
fn target_for(i: i32) -> Vec3 {
    let angle = i as f32 * 0.1;
    Vec3::new(angle.cos() * 5.0, angle.sin() * 5.0, (i % 7) as f32)
}

/// Run performance comparison of the per-frame pipeline stages at the
/// default ribbon resolution (201 bones, 2211 vertices)
#[wasm_bindgen]
pub fn run_benchmarks(iterations: i32) -> JsValue {
    use std::hint::black_box;

    let window = web_sys::window().expect("should have a window");
    let perf = window.performance().expect("should have performance");

    let config = RibbonConfig::default();
    let grid = match PlaneGrid::new(&config) {
        Ok(grid) => grid,
        Err(_) => return JsValue::NULL,
    };
    let mut chain = Chain::build(&grid);
    let mut buffers = MeshBuffers::new(config.vertex_count());

    // Warm-up to trigger JIT
    for i in 0..1_000 {
        chain.follow(black_box(target_for(i)));
        chain.write_buffers(&mut buffers);
    }

    // 1. Follow cascade alone
    let start = perf.now();
    for i in 0..iterations {
        chain.follow(black_box(target_for(i)));
    }
    let follow_time = perf.now() - start;

    // 2. Buffer scatter alone
    let start = perf.now();
    for _ in 0..iterations {
        chain.write_buffers(&mut buffers);
        black_box(buffers.positions());
    }
    let scatter_time = perf.now() - start;

    // 3. Full frame (follow + scatter)
    let start = perf.now();
    for i in 0..iterations {
        chain.follow(black_box(target_for(i)));
        chain.write_buffers(&mut buffers);
    }
    let frame_time = perf.now() - start;

    let result = BenchmarkResults {
        iterations,
        follow_ms: follow_time,
        scatter_ms: scatter_time,
        frame_ms: frame_time,
        bones: chain.bones().len(),
        vertices: chain.vertex_count(),
    };

    serde_wasm_bindgen::to_value(&result).unwrap()
}
