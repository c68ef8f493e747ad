//! Indexed-mesh renderer for the scene's renderables.
//!
//! Each renderable owns its vertex/index buffers and a per-object uniform
//! buffer (group 0) rewritten every frame. The lighting uniform is shared
//! at group 1.

use wgpu::util::DeviceExt;

use crate::gpu::lighting::LightingBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;
use crate::renderer::pipeline_util;
use crate::scene::{
    FrameSnapshot, MeshVertex, ObjectUniform, Renderable, Topology,
};

/// Background color behind the scene.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.04,
    a: 1.0,
};

/// Vertex buffer layout for [`MeshVertex`].
fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0, // position
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1, // normal
            },
        ],
    }
}

/// Create the shared pipeline for one primitive topology.
fn create_mesh_pipeline(
    context: &RenderContext,
    label: &str,
    shader: &wgpu::ShaderModule,
    topology: wgpu::PrimitiveTopology,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        },
    );

    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::color_targets(context.format()),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                // Axis quads and the pyramid are visible from both sides.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}

/// GPU-resident copy of one renderable.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    topology: Topology,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        renderable: &Renderable,
    ) -> Self {
        let name = renderable.name;
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name} Vertex Buffer")),
                contents: bytemuck::cast_slice(&renderable.mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name} Index Buffer")),
                contents: bytemuck::cast_slice(&renderable.mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name} Object Buffer")),
                contents: bytemuck::cast_slice(&[ObjectUniform::default()]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{name} Object Bind Group")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: renderable.mesh.indices.len() as u32,
            topology: renderable.topology(),
            uniform_buffer,
            bind_group,
        }
    }
}

/// Draws every renderable of a [`Scene`](crate::scene::Scene).
pub struct SceneRenderer {
    triangle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    meshes: Vec<GpuMesh>,
    lighting: LightingBuffer,
    depth: DepthTexture,
}

impl SceneRenderer {
    /// Upload the static geometry and build both pipelines.
    #[must_use]
    pub fn new(context: &RenderContext, renderables: &[Renderable]) -> Self {
        let device = &context.device;
        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/phong.wgsl"
        ));

        let object_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ObjectUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let lighting = LightingBuffer::new(context);
        let layouts = [&object_layout, &lighting.layout];

        let triangle_pipeline = create_mesh_pipeline(
            context,
            "Mesh Pipeline",
            &shader,
            wgpu::PrimitiveTopology::TriangleList,
            &layouts,
        );
        let line_pipeline = create_mesh_pipeline(
            context,
            "Line Pipeline",
            &shader,
            wgpu::PrimitiveTopology::LineList,
            &layouts,
        );

        let meshes = renderables
            .iter()
            .map(|renderable| GpuMesh::new(device, &object_layout, renderable))
            .collect();

        let (width, height) = context.size();
        Self {
            triangle_pipeline,
            line_pipeline,
            meshes,
            lighting,
            depth: DepthTexture::new(device, width, height),
        }
    }

    /// Recreate the depth buffer after a surface resize.
    pub fn resize(&mut self, context: &RenderContext) {
        let (width, height) = context.size();
        if self.depth.size() != (width.max(1), height.max(1)) {
            self.depth = DepthTexture::new(&context.device, width, height);
        }
    }

    /// Write this frame's per-object and lighting uniforms.
    pub fn prepare(&mut self, queue: &wgpu::Queue, frame: &FrameSnapshot) {
        for (mesh, object) in self.meshes.iter().zip(&frame.objects) {
            queue.write_buffer(
                &mesh.uniform_buffer,
                0,
                bytemuck::cast_slice(&[object.to_gpu()]),
            );
        }
        self.lighting.update(queue, &frame.lighting);
    }

    /// Encode the scene into `target`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) {
        let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene render pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        rp.set_bind_group(1, &self.lighting.bind_group, &[]);
        for mesh in &self.meshes {
            if mesh.index_count == 0 {
                continue;
            }
            let pipeline = match mesh.topology {
                Topology::Triangles => &self.triangle_pipeline,
                Topology::Lines => &self.line_pipeline,
            };
            rp.set_pipeline(pipeline);
            rp.set_bind_group(0, &mesh.bind_group, &[]);
            rp.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rp.set_index_buffer(
                mesh.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            rp.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
