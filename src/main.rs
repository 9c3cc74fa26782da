// Declare modules directly in the binary crate root
pub mod catalog;
pub mod clock;
pub mod compute;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod input;
pub mod kernel;
pub mod neighborhood;
pub mod pattern;
pub mod render;
pub mod rules;
pub mod state;
pub mod theme;
pub mod ui;
pub mod view;

use crate::config::Config;
use crate::error::AppError;
use crate::state::State;

use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

const INITIAL_WIDTH: f64 = 1280.0;
const INITIAL_HEIGHT: f64 = 720.0;

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, app_config: Config) -> Result<(), AppError> {
    let mut state = State::new(window, &app_config).await?;

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, ref event } if window_id == state.window.id() => {
                // Pass window-specific events to egui_winit FIRST
                let response = state.egui_winit_state.on_window_event(&state.window, event);
                if response.repaint {
                    state.window.request_redraw();
                }

                if response.consumed && !input::bypasses_overlay(event) {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        input::handle_keyboard(&mut state, event);
                    }
                    WindowEvent::MouseInput { state: element_state, button, .. } => {
                        input::handle_mouse_input(&mut state, *button, *element_state);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input::handle_cursor_move(&mut state, *position);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input::handle_cursor_left(&mut state);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        input::handle_zoom(&mut state, input::scroll_amount(*delta));
                    }
                    WindowEvent::RedrawRequested => {
                        state.update();

                        let output_frame = match state.render() {
                            Ok(frame) => frame,
                            Err(e) => {
                                // Lost surfaces were already reconfigured in render().
                                log::warn!("Skipping frame due to surface error: {:?}", e);
                                state.window.request_redraw();
                                return;
                            }
                        };
                        draw_overlay(&mut state, &output_frame);
                        output_frame.present();
                    }
                    _ => (),
                }
            }
            Event::AboutToWait => {
                state.window.request_redraw();
            }
            _ => (),
        }
    })?;

    Ok(())
}

/// Runs the egui pass on top of the already rendered grid and applies any
/// actions it produced.
fn draw_overlay(state: &mut State, output_frame: &wgpu::SurfaceTexture) {
    let output_view = output_frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let raw_input = state.egui_winit_state.take_egui_input(&state.window);
    state.egui_ctx.begin_frame(raw_input);
    let actions = ui::overlay(&state.egui_ctx, &state.controller);
    let full_output = state.egui_ctx.end_frame();

    let pixels_per_point = state.window.scale_factor() as f32;
    let paint_jobs = state.egui_ctx.tessellate(full_output.shapes, pixels_per_point);
    let screen_descriptor = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [state.config.width, state.config.height],
        pixels_per_point,
    };

    let mut encoder = state.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("egui Encoder"),
    });
    for (id, image_delta) in &full_output.textures_delta.set {
        state.egui_renderer.update_texture(&state.device, &state.queue, *id, image_delta);
    }
    state.egui_renderer.update_buffers(
        &state.device,
        &state.queue,
        &mut encoder,
        &paint_jobs,
        &screen_descriptor,
    );
    state.egui_winit_state.handle_platform_output(&state.window, full_output.platform_output);

    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("egui Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load, // Keep the grid drawn underneath
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        state.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
    }

    for id in &full_output.textures_delta.free {
        state.egui_renderer.free_texture(id);
    }
    state.queue.submit(Some(encoder.finish()));

    for action in actions {
        state.apply(action);
    }
}

fn main() -> Result<(), AppError> {
    env_logger::init();
    let app_config = Config::from_env();
    log::info!("Starting with {:?}", app_config);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        winit::window::WindowBuilder::new()
            .with_title("GPU Automaton")
            .with_inner_size(winit::dpi::LogicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT))
            .build(&event_loop)?,
    );

    pollster::block_on(run(event_loop, window, app_config))
}
