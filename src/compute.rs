use std::sync::Arc;
use wgpu::util::DeviceExt;

use crate::grid::{CellColor, GridSize};
use crate::kernel::{Slot, StepKernel, StepParams};

pub const WORKGROUP_SIZE: u32 = 8;

/// Step kernel running `shaders/step.wgsl` on the GPU.
///
/// Bind group `i` reads grid buffer `i` and writes grid buffer `1 - i`, so a
/// step from [`Slot::A`] uses bind group 0.
pub struct GpuKernel {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    size: GridSize,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    params_buffer: wgpu::Buffer,
    grid_buffers: [wgpu::Buffer; 2],
    bind_groups: [wgpu::BindGroup; 2],
}

impl GpuKernel {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>, size: GridSize) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Step Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/step.wgsl").into()),
        });

        let storage = |binding: u32, read_only: bool| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Step Bind Group Layout"),
            entries: &[
                storage(0, true),  // StepParams
                storage(1, true),  // Input grid
                storage(2, false), // Output grid
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Step Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Step Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: "main",
        });

        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Step Parameters"),
            contents: bytemuck::bytes_of(&<StepParams as bytemuck::Zeroable>::zeroed()),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });

        let grid_buffers = create_grid_buffers(&device, size);
        let bind_groups = create_bind_groups(&device, &bind_group_layout, &params_buffer, &grid_buffers);

        log::info!("Step pipeline ready for {}x{} grid", size.width, size.height);

        Self {
            device,
            queue,
            size,
            pipeline,
            bind_group_layout,
            params_buffer,
            grid_buffers,
            bind_groups,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn grid_buffers(&self) -> &[wgpu::Buffer; 2] {
        &self.grid_buffers
    }
}

impl StepKernel for GpuKernel {
    fn resize(&mut self, size: GridSize) {
        // In-flight submissions keep the old buffers alive until they finish.
        self.size = size;
        self.grid_buffers = create_grid_buffers(&self.device, size);
        self.bind_groups = create_bind_groups(
            &self.device,
            &self.bind_group_layout,
            &self.params_buffer,
            &self.grid_buffers,
        );
    }

    fn upload(&mut self, slot: Slot, cells: &[CellColor]) {
        let expected = self.size.cell_count();
        if cells.len() != expected {
            log::warn!("Ignoring upload of {} cells into {}-cell buffer", cells.len(), expected);
            return;
        }
        self.queue.write_buffer(&self.grid_buffers[slot.index()], 0, bytemuck::cast_slice(cells));
    }

    fn step(&mut self, source: Slot, params: &StepParams) {
        self.queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(params));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Step Encoder") });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Step Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_groups[source.index()], &[]);
            let dispatch_x = (self.size.width + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE;
            let dispatch_y = (self.size.height + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE;
            pass.dispatch_workgroups(dispatch_x, dispatch_y, 1);
        }
        self.queue.submit(Some(encoder.finish()));
    }
}

fn create_grid_buffers(device: &wgpu::Device, size: GridSize) -> [wgpu::Buffer; 2] {
    let buffer_size = (size.cell_count() * std::mem::size_of::<CellColor>()) as u64;
    let make = |label: &str| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: buffer_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        })
    };
    [make("Grid Buffer 0"), make("Grid Buffer 1")]
}

fn create_bind_groups(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    params_buffer: &wgpu::Buffer,
    grid_buffers: &[wgpu::Buffer; 2],
) -> [wgpu::BindGroup; 2] {
    let make = |label: &str, input: &wgpu::Buffer, output: &wgpu::Buffer| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: params_buffer.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: input.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 2, resource: output.as_entire_binding() },
            ],
        })
    };
    [
        make("Step Bind Group 0", &grid_buffers[0], &grid_buffers[1]),
        make("Step Bind Group 1", &grid_buffers[1], &grid_buffers[0]),
    ]
}
