use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;
use wgpu::util::DeviceExt;

use crate::grid::{CellColor, GridSize};
use crate::kernel::Slot;
use crate::view::ViewTransform;

// Uniforms specific to rendering
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RenderParams {
    pub background: [f32; 4],
    pub screen_size: [f32; 2],
    /// Top-left corner of the grid in y-down screen pixels.
    pub origin: [f32; 2],
    pub grid_size: [f32; 2],
    pub scale: f32,
    pub _padding: f32, // 16-byte struct alignment
}

impl RenderParams {
    pub fn new(view: &ViewTransform, screen: [f32; 2], grid: GridSize, background: CellColor) -> Self {
        let grid_size = [grid.width as f32, grid.height as f32];
        Self {
            background: background.to_f32(),
            screen_size: screen,
            origin: view.grid_origin(screen, grid_size),
            grid_size,
            scale: view.scale() as f32,
            _padding: 0.0,
        }
    }
}

/// Blits the front grid buffer to the surface. One bind group per slot.
pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    params_buffer: wgpu::Buffer,
    bind_groups: [wgpu::BindGroup; 2],
}

impl GridRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, grid_buffers: &[wgpu::Buffer; 2]) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Render Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/render.wgsl").into()),
        });

        let bind_group_layout = create_render_bind_group_layout(device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(format.into())],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Render Parameters"),
            contents: bytemuck::bytes_of(&RenderParams::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_groups = create_render_bind_groups(device, &bind_group_layout, grid_buffers, &params_buffer);

        Self {
            pipeline,
            bind_group_layout,
            params_buffer,
            bind_groups,
        }
    }

    /// Must be called whenever the grid buffers are reallocated.
    pub fn rebind(&mut self, device: &wgpu::Device, grid_buffers: &[wgpu::Buffer; 2]) {
        self.bind_groups =
            create_render_bind_groups(device, &self.bind_group_layout, grid_buffers, &self.params_buffer);
    }

    pub fn draw(&self, queue: &wgpu::Queue, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, front: Slot, params: &RenderParams) {
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(params));

        let [r, g, b, _] = params.background;
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r: r as f64, g: g as f64, b: b as f64, a: 1.0 }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_groups[front.index()], &[]);
        render_pass.draw(0..3, 0..1); // Full-screen triangle
    }
}

fn create_render_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Render Bind Group Layout"),
        entries: &[
            // RenderParams Uniform (Binding 0)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<RenderParams>() as u64),
                },
                count: None,
            },
            // Grid State Buffer (Binding 1)
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    })
}

fn create_render_bind_groups(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    grid_buffers: &[wgpu::Buffer; 2],
    params_buffer: &wgpu::Buffer,
) -> [wgpu::BindGroup; 2] {
    let make = |label: &str, grid: &wgpu::Buffer| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: params_buffer.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: grid.as_entire_binding() },
            ],
        })
    };
    [
        make("Render Bind Group 0", &grid_buffers[0]),
        make("Render Bind Group 1", &grid_buffers[1]),
    ]
}
