use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::lighting::LightingUniform;

/// GPU copy of the light list, bound at group 1 of the mesh pipelines.
pub struct LightingBuffer {
    /// Last uploaded contents.
    pub uniform: LightingUniform,
    /// Uniform buffer holding one [`LightingUniform`].
    pub buffer: wgpu::Buffer,
    /// Layout for the lighting bind group.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over `buffer`.
    pub bind_group: wgpu::BindGroup,
}

impl LightingBuffer {
    /// Allocate the buffer with no lights.
    #[must_use]
    pub fn new(context: &RenderContext) -> Self {
        let uniform = LightingUniform::default();

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Lighting Bind Group"),
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload a new snapshot if it differs from the last one.
    pub fn update(&mut self, queue: &wgpu::Queue, uniform: &LightingUniform) {
        if self.uniform == *uniform {
            return;
        }
        self.uniform = *uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
