//! Render pipeline for scene meshes
//!
//! Draws three vertex streams in order: opaque triangles, line segments,
//! then transparent triangles without depth writes. All passes share one
//! uniform buffer and one shader.

use wgpu::util::DeviceExt;

use super::types::{SceneUniforms, Vertex};
use crate::RenderableGeometry;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A vertex buffer and how many vertices it holds
#[derive(Default)]
struct VertexBatch {
    buffer: Option<wgpu::Buffer>,
    count: u32,
}

impl VertexBatch {
    fn upload(&mut self, device: &wgpu::Device, label: &str, vertices: &[Vertex]) {
        if vertices.is_empty() {
            self.buffer = None;
            self.count = 0;
            return;
        }
        self.buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.count = vertices.len() as u32;
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipeline: &wgpu::RenderPipeline) {
        if let Some(buffer) = &self.buffer {
            pass.set_pipeline(pipeline);
            pass.set_vertex_buffer(0, buffer.slice(..));
            pass.draw(0..self.count, 0..1);
        }
    }
}

/// Render pipelines and targets for drawing a scene
pub struct MeshPipeline {
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    /// Uniform buffer
    uniform_buffer: wgpu::Buffer,
    /// Bind group for uniforms
    bind_group: wgpu::BindGroup,
    opaque: VertexBatch,
    transparent: VertexBatch,
    lines: VertexBatch,
    surface_format: wgpu::TextureFormat,
    sample_count: u32,
    /// Multisampled color target (only when sample_count > 1)
    msaa_view: Option<wgpu::TextureView>,
    /// Depth texture
    depth_view: Option<wgpu::TextureView>,
    target_size: (u32, u32),
}

impl MeshPipeline {
    /// Create a new mesh pipeline
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, sample_count: u32) -> Self {
        // Create bind group layout
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[
                // Uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        // Create pipeline layout
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Load shader
        let shader_source = include_str!("../shaders/scene.wgsl");
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let opaque_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            sample_count,
            PassKind::Opaque,
        );
        let transparent_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            sample_count,
            PassKind::Transparent,
        );
        let line_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            sample_count,
            PassKind::Lines,
        );

        // Create uniform buffer
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::bytes_of(&SceneUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Create bind group
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            opaque_pipeline,
            transparent_pipeline,
            line_pipeline,
            uniform_buffer,
            bind_group,
            opaque: VertexBatch::default(),
            transparent: VertexBatch::default(),
            lines: VertexBatch::default(),
            surface_format,
            sample_count,
            msaa_view: None,
            depth_view: None,
            target_size: (0, 0),
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        kind: PassKind,
    ) -> wgpu::RenderPipeline {
        let (label, topology, depth_write_enabled, blend) = match kind {
            PassKind::Opaque => (
                "Opaque Mesh Pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                true,
                wgpu::BlendState::REPLACE,
            ),
            PassKind::Transparent => (
                "Transparent Mesh Pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                false,
                wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
            ),
            PassKind::Lines => (
                "Line Pipeline",
                wgpu::PrimitiveTopology::LineList,
                true,
                wgpu::BlendState::REPLACE,
            ),
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Self::vertex_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Face selection happens in the shader per material
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    /// Get the vertex buffer layout for Vertex
    fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                // color: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 24,
                    shader_location: 2,
                },
                // material: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 40,
                    shader_location: 3,
                },
            ],
        }
    }

    /// Replace the uploaded vertex streams
    pub fn upload(&mut self, device: &wgpu::Device, geometry: &RenderableGeometry) {
        self.opaque.upload(device, "Opaque Vertex Buffer", &geometry.opaque);
        self.transparent.upload(device, "Transparent Vertex Buffer", &geometry.transparent);
        self.lines.upload(device, "Line Vertex Buffer", &geometry.lines);
    }

    /// Update uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Ensure depth (and multisample) targets exist and are the right size
    pub fn ensure_targets(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.depth_view.is_some() && self.target_size == (width, height) {
            return;
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: self.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.depth_view = Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));

        self.msaa_view = if self.sample_count > 1 {
            let msaa_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("MSAA Color Texture"),
                size,
                mip_level_count: 1,
                sample_count: self.sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: self.surface_format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            Some(msaa_texture.create_view(&wgpu::TextureViewDescriptor::default()))
        } else {
            None
        };

        self.target_size = (width, height);
    }

    /// Draw the uploaded streams into `view`
    ///
    /// Does nothing until [`ensure_targets`](Self::ensure_targets) has run.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, clear_color: wgpu::Color) {
        let Some(depth_view) = self.depth_view.as_ref() else {
            log::warn!("render called before depth texture was created");
            return;
        };

        // Draw into the multisampled target and resolve into the surface
        let (color_view, resolve_target) = match &self.msaa_view {
            Some(msaa_view) => (msaa_view, Some(view)),
            None => (view, None),
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.bind_group, &[]);
        self.opaque.draw(&mut render_pass, &self.opaque_pipeline);
        self.lines.draw(&mut render_pass, &self.line_pipeline);
        self.transparent.draw(&mut render_pass, &self.transparent_pipeline);
    }

    /// Number of samples per pixel
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }
}

#[derive(Clone, Copy, Debug)]
enum PassKind {
    Opaque,
    Transparent,
    Lines,
}
