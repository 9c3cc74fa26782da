use std::sync::Arc;
use std::time::Instant;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    window::Window,
};

// GUI Imports
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui_winit::State as EguiWinitState;

use crate::compute::GpuKernel;
use crate::config::Config;
use crate::controller::{Action, InteractionController};
use crate::error::AppError;
use crate::grid::{GridSize, Seed};
use crate::render::{GridRenderer, RenderParams};

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub kernel: GpuKernel,
    pub renderer: GridRenderer,
    pub controller: InteractionController,
    last_frame: Instant,

    // Pointer tracking
    pub is_right_mouse_pressed: bool,
    pub cursor_pos: Option<PhysicalPosition<f64>>,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
}

impl State {
    pub async fn new(window: Arc<Window>, app_config: &Config) -> Result<Self, AppError> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(AppError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![surface_format],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let grid_size = GridSize::from_viewport(config.width, config.height);
        let mut controller = InteractionController::new(app_config, grid_size)?;
        let mut kernel = GpuKernel::new(device.clone(), queue.clone(), grid_size);
        let renderer = GridRenderer::new(&device, config.format, kernel.grid_buffers());
        controller.reseed(Seed::Empty, &mut kernel);

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state = EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);

        log::info!("wgpu initialized successfully.");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            kernel,
            renderer,
            controller,
            last_frame: Instant::now(),
            is_right_mouse_pressed: false,
            cursor_pos: None,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            log::warn!("Ignoring resize to zero dimensions: {}x{}", new_size.width, new_size.height);
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let grid_size = GridSize::from_viewport(new_size.width, new_size.height);
        if self.controller.resize(grid_size, &mut self.kernel) {
            self.renderer.rebind(&self.device, self.kernel.grid_buffers());
        }
        log::info!("Reconfigured surface to: {}x{}", new_size.width, new_size.height);
    }

    pub fn apply(&mut self, action: Action) {
        self.controller.apply(action, &mut self.kernel);
    }

    /// Advances the simulation by the wall-clock time since the last call.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.controller.update(delta_time, &mut self.kernel);
    }

    /// Draws the front grid buffer. Returns the surface texture for egui to draw on.
    pub fn render(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };

        let output_view = output_frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let params = RenderParams::new(
            &self.controller.view,
            [self.config.width as f32, self.config.height as f32],
            self.kernel.size(),
            self.controller.theme().background,
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });
        self.renderer.draw(&self.queue, &mut encoder, &output_view, self.controller.clock.front(), &params);
        self.queue.submit(Some(encoder.finish()));

        // Presented after the egui pass.
        Ok(output_frame)
    }
}
