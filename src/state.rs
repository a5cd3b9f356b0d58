//! Centralized application state with context passing pattern
//!
//! `AppState` is a single struct owning the ribbon's runtime pieces; core
//! functions take explicit references (e.g. `&Camera`, `&mut Chain`)
//! rather than reaching for globals, and the wasm bindings are thin
//! wrappers around the thread-local holder below. This keeps the whole
//! update pipeline unit-testable on native targets.

use std::cell::RefCell;

use crate::buffers::MeshBuffers;
use crate::camera::Camera;
use crate::chain::Chain;
use crate::config::{ConfigError, RibbonConfig};
use crate::geometry::PlaneGrid;
use crate::target::PointerTracker;

/// Everything the visualization owns between frames. Topology (chain
/// structure, buffer lengths, triangle indices) is fixed at construction;
/// only attribute contents and camera/pointer state mutate per frame.
pub struct AppState {
    pub config: RibbonConfig,
    pub chain: Chain,
    pub buffers: MeshBuffers,
    /// Built once, handed to the renderer, never rebuilt
    pub triangle_indices: Vec<u32>,
    pub camera: Camera,
    pub pointer: PointerTracker,
    /// Viewport aspect ratio, updated on resize
    pub aspect: f32,
}

impl AppState {
    /// Validate the config and build the full pipeline: grid, chain,
    /// buffers, topology. Fails before any allocation on a bad config.
    pub fn new(config: RibbonConfig) -> Result<Self, ConfigError> {
        let grid = PlaneGrid::new(&config)?;
        let chain = Chain::build(&grid);
        let mut buffers = MeshBuffers::new(config.vertex_count());
        chain.write_buffers(&mut buffers);
        let triangle_indices = grid.triangle_indices();

        Ok(Self {
            config,
            chain,
            buffers,
            triangle_indices,
            camera: Camera::default(),
            pointer: PointerTracker::default(),
            aspect: 16.0 / 9.0,
        })
    }

    /// One frame of the visualization: read the latest pointer target,
    /// cascade the chain, scatter the buffers. Called exactly once per
    /// rendered frame; repeated calls with an unchanged pointer are
    /// idempotent.
    pub fn update_frame(&mut self) {
        let target = self.pointer.world_target(&self.camera, self.aspect);
        self.chain.follow(target);
        self.chain.write_buffers(&mut self.buffers);
    }
}

// Global state access, thin wrapper for WASM bindings only
thread_local! {
    static APP_STATE: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

/// Execute a closure with immutable access to AppState
///
/// Returns None if AppState is not initialized
pub fn with_app_state<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&AppState) -> R,
{
    APP_STATE.with(|state| {
        let borrowed = state.borrow();
        borrowed.as_ref().map(f)
    })
}

/// Execute a closure with mutable access to AppState
///
/// Returns None if AppState is not initialized
pub fn with_app_state_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut AppState) -> R,
{
    APP_STATE.with(|state| {
        let mut borrowed = state.borrow_mut();
        borrowed.as_mut().map(f)
    })
}

/// Install a freshly built AppState, replacing any previous one
///
/// Called once from init_ribbon(); rebuilding is the only way to change
/// topology.
pub fn initialize_app_state(app: AppState) {
    APP_STATE.with(|state| {
        *state.borrow_mut() = Some(app);
    });
}
