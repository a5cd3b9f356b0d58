//! WebGPU shell using wgpu
//!
//! Owns the surface and the mesh buffer allocations. Buffers are created
//! once, sized from the mesh topology; every frame only their contents
//! are re-uploaded (`queue.write_buffer`), never reallocated. Pipelines,
//! materials, lighting, and textures belong to the host renderer.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

thread_local! {
    static GPU_STATE: RefCell<Option<GpuState>> = const { RefCell::new(None) };
}

struct GpuState {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    /// Dynamic vertex attribute buffers, fixed size for the app lifetime
    positions_buffer: wgpu::Buffer,
    normals_buffer: wgpu::Buffer,
    /// Static topology, written once at init
    #[allow(dead_code)]
    index_buffer: wgpu::Buffer,
}

/// Initialize WebGPU context from a canvas element
///
/// Call after init_ribbon(): buffer sizes come from the built topology.
#[wasm_bindgen]
pub fn init_gpu(canvas_id: &str) {
    // Set up panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let canvas_id = canvas_id.to_string();

    spawn_local(async move {
        let sizes = crate::state::with_app_state(|app| {
            (
                app.buffers.positions().len(),
                app.triangle_indices.clone(),
            )
        });
        let (attr_len, indices) = match sizes {
            Some(s) => s,
            None => {
                log::warn!("init_gpu called before init_ribbon, no buffers to allocate");
                return;
            }
        };

        let window = web_sys::window().expect("No window");
        let document = window.document().expect("No document");
        let canvas = document
            .get_element_by_id(&canvas_id)
            .expect("Canvas not found")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("Not a canvas");

        let width = canvas.client_width() as u32;
        let height = canvas.client_height() as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        // Create surface from canvas
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .expect("Failed to create surface");

        // Request adapter (GPU)
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to find GPU adapter");

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .expect("Failed to create device");

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let attr_bytes = (attr_len * std::mem::size_of::<f32>()) as u64;
        let positions_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Ribbon Positions"),
            size: attr_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let normals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Ribbon Normals"),
            size: attr_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Ribbon Indices"),
            size: (indices.len() * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Topology never changes after this write
        queue.write_buffer(&index_buffer, 0, bytemuck::cast_slice(&indices));

        crate::state::with_app_state_mut(|app| {
            app.aspect = width as f32 / height.max(1) as f32;
        });

        let state = GpuState {
            device,
            queue,
            surface,
            config,
            positions_buffer,
            normals_buffer,
            index_buffer,
        };

        GPU_STATE.with(|s| {
            *s.borrow_mut() = Some(state);
        });

        log::info!("WebGPU initialized, ribbon buffers allocated");
    });
}

/// Re-upload the current frame's vertex attribute contents.
///
/// A content update into the existing allocations; the buffers were
/// sized once at init and their length never changes.
pub fn upload_mesh_buffers() {
    GPU_STATE.with(|s| {
        let state_ref = s.borrow();
        if let Some(state) = state_ref.as_ref() {
            crate::state::with_app_state(|app| {
                state.queue.write_buffer(
                    &state.positions_buffer,
                    0,
                    bytemuck::cast_slice(app.buffers.positions()),
                );
                state.queue.write_buffer(
                    &state.normals_buffer,
                    0,
                    bytemuck::cast_slice(app.buffers.normals()),
                );
            });
        }
    });
}

/// Resize the surface and keep the camera aspect in sync
#[wasm_bindgen]
pub fn resize_surface(width: u32, height: u32) {
    GPU_STATE.with(|s| {
        let mut state_ref = s.borrow_mut();
        if let Some(state) = state_ref.as_mut() {
            state.config.width = width.max(1);
            state.config.height = height.max(1);
            state.surface.configure(&state.device, &state.config);
        }
    });

    crate::state::with_app_state_mut(|app| {
        app.aspect = width as f32 / height.max(1) as f32;
    });
}

/// Render a frame (clears with a color)
#[wasm_bindgen]
pub fn render_frame() {
    GPU_STATE.with(|s| {
        let state_ref = s.borrow();
        if let Some(state) = state_ref.as_ref() {
            let output = match state.surface.get_current_texture() {
                Ok(t) => t,
                Err(_) => return, // Surface lost, skip frame
            };

            let view = output
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());

            let mut encoder =
                state
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Render Encoder"),
                    });

            {
                let _render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Clear Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: 0.686,
                                g: 0.741,
                                b: 0.678,
                                a: 1.0,
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            }

            state.queue.submit(std::iter::once(encoder.finish()));
            output.present();
        }
    });
}
