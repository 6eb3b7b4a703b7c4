//! GPU rendition of the vertex transform stage.
//!
//! [`TransformPass`] wraps the `vs_main` entry point of `shaders/transform.wgsl`
//! in a wgpu render pipeline. It owns the uniform buffer holding the two
//! transform matrices and the bind group exposing it to the vertex shader.
//! The fragment stage belongs to the caller and is passed in as a shader module.
//!
//! # Bind Groups
//!
//! - **Group 0, binding 0**: [`TransformUniformsRaw`] (world matrix, then projection-view matrix)
//!
//! # Stage Outputs
//!
//! | Output          | Location             |
//! |-----------------|----------------------|
//! | clip position   | `@builtin(position)` |
//! | tex             | `@location(0)`       |
//!
//! # Example
//!
//! ```ignore
//! use vertex_stage::{GpuConfig, GpuContext, TransformPass, TransformPassConfig, TransformUniforms};
//!
//! let gpu = GpuContext::new(&GpuConfig::default())?;
//! let fragment = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
//!     label: Some("Block Fragment"),
//!     source: wgpu::ShaderSource::Wgsl(include_str!("block.wgsl").into()),
//! });
//! let pass = TransformPass::new(&gpu, &TransformPassConfig::default(), &fragment);
//!
//! // Once per draw, before submitting the encoder that records it.
//! pass.write_uniforms(&gpu, &TransformUniforms::new(chunk_world, camera_proj_view));
//! pass.draw(&mut render_pass, &vertex_buffer, 0..vertex_count);
//! ```

use std::ops::Range;

use crate::gpu::GpuContext;
use crate::uniforms::{TransformUniforms, TransformUniformsRaw};
use crate::vertex::Vertex;

/// WGSL source of the vertex stage.
pub const SHADER_SOURCE: &str = include_str!("shaders/transform.wgsl");

/// Name of the vertex entry point in [`SHADER_SOURCE`].
pub const VERTEX_ENTRY: &str = "vs_main";

/// Bind group index the transform uniforms are bound at.
pub const UNIFORM_GROUP: u32 = 0;

/// Render target and fragment options for a [`TransformPass`].
#[derive(Clone, Debug)]
pub struct TransformPassConfig {
    /// Format of the color attachment the caller renders into.
    pub color_format: wgpu::TextureFormat,
    /// Depth attachment format, or `None` for no depth testing.
    pub depth_format: Option<wgpu::TextureFormat>,
    /// Entry point of the caller's fragment shader.
    pub fragment_entry: String,
}

impl Default for TransformPassConfig {
    fn default() -> Self {
        Self {
            color_format: wgpu::TextureFormat::Bgra8UnormSrgb,
            depth_format: Some(wgpu::TextureFormat::Depth32Float),
            fragment_entry: "fs_main".to_string(),
        }
    }
}

impl TransformPassConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    pub fn depth_format(mut self, format: Option<wgpu::TextureFormat>) -> Self {
        self.depth_format = format;
        self
    }

    pub fn fragment_entry(mut self, entry: impl Into<String>) -> Self {
        self.fragment_entry = entry.into();
        self
    }
}

/// Render pipeline running the vertex transform stage on the GPU.
///
/// # Pipeline Configuration
///
/// - Triangle list topology, no face culling
/// - Depth write with Less-than comparison when a depth format is configured
/// - Color target replaced, not blended
pub struct TransformPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group_layout: wgpu::BindGroupLayout,
    uniform_bind_group: wgpu::BindGroup,
}

impl TransformPass {
    /// Creates the pass.
    ///
    /// # Arguments
    ///
    /// * `gpu` - The GPU context owning the device
    /// * `config` - Target formats and fragment entry point
    /// * `fragment` - The caller's fragment shader; it receives `tex` at `@location(0)`
    pub fn new(gpu: &GpuContext, config: &TransformPassConfig, fragment: &wgpu::ShaderModule) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Transform Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Transform Uniforms"),
            size: std::mem::size_of::<TransformUniformsRaw>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<TransformUniformsRaw>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Transform Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let depth_stencil = config.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Transform Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment,
                entry_point: Some(config.fragment_entry.as_str()),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        log::debug!(
            "transform pass created (color {:?}, depth {:?}, fragment '{}')",
            config.color_format,
            config.depth_format,
            config.fragment_entry
        );

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group_layout,
            uniform_bind_group,
        }
    }

    /// Uploads the uniforms read by the next draw.
    ///
    /// Queue writes land before the next submission. Draws recorded into one
    /// submission all read the last values written before it.
    pub fn write_uniforms(&self, gpu: &GpuContext, uniforms: &TransformUniforms) {
        let raw = uniforms.to_raw();
        gpu.queue.write_buffer(&self.uniform_buffer, 0, raw.as_bytes());
    }

    /// Records a draw of `vertices` from `vertex_buffer` with the current uniforms.
    ///
    /// `vertex_buffer` must hold [`Vertex`] records laid out as [`Vertex::LAYOUT`].
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        vertex_buffer: &wgpu::Buffer,
        vertices: Range<u32>,
    ) {
        log::trace!("transform pass: drawing {} vertices", vertices.len());
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(UNIFORM_GROUP, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.draw(vertices, 0..1);
    }

    /// The render pipeline, for callers recording draws themselves.
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Layout of the uniform bind group (group [`UNIFORM_GROUP`]).
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.uniform_bind_group_layout
    }

    /// The uniform bind group, for callers recording draws themselves.
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.uniform_bind_group
    }
}
