use glam::Mat4;
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
use helpers::{PipelineSpec, ADDITIVE, VEC3_ATTRS_0, VEC3_ATTRS_1};

use crate::shaders;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    tint: [f32; 4],
    beat: f32,
    time: f32,
    _pad: [f32; 2],
}

impl FrameUniforms {
    pub fn new(view_proj: Mat4, model: Mat4, tint: [f32; 4], beat: f32, time: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            tint,
            beat,
            time,
            _pad: [0.0; 2],
        }
    }
}

/// Initial geometry handed to the renderer.
pub struct SceneGeometry<'s> {
    pub vertex_bytes: &'s [u8],
    pub indices: &'s [u32],
    pub spark_capacity_points: usize,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    heart_pipeline: wgpu::RenderPipeline,
    spark_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    heart_vertices: wgpu::Buffer,
    heart_indices: wgpu::Buffer,
    index_count: u32,
    spark_positions: wgpu::Buffer,
    spark_colors: wgpu::Buffer,
    spark_points: u32,

    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        geometry: SceneGeometry<'_>,
        clear_rgb: [f64; 3],
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let heart_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("heart_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::with_frame_block(shaders::HEART_WGSL).into()),
        });
        let spark_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sparks_shader"),
            source: wgpu::ShaderSource::Wgsl(
                shaders::with_frame_block(shaders::SPARKS_WGSL).into(),
            ),
        });
        let heart_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            format,
            PipelineSpec {
                label: "heart_pipeline",
                shader: &heart_shader,
                vs_entry: "vs_heart",
                fs_entry: "fs_heart",
                buffers: &[helpers::vec3_layout(&VEC3_ATTRS_0)],
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: true,
            },
        );
        let spark_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            format,
            PipelineSpec {
                label: "sparks_pipeline",
                shader: &spark_shader,
                vs_entry: "vs_sparks",
                fs_entry: "fs_sparks",
                buffers: &[
                    helpers::vec3_layout(&VEC3_ATTRS_0),
                    helpers::vec3_layout(&VEC3_ATTRS_1),
                ],
                topology: wgpu::PrimitiveTopology::PointList,
                blend: ADDITIVE,
                depth_write: false,
            },
        );

        let heart_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("heart_vertices"),
            contents: geometry.vertex_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let heart_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("heart_indices"),
            contents: bytemuck::cast_slice(geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let spark_bytes = (geometry.spark_capacity_points * 12) as u64;
        let spark_positions =
            helpers::create_dynamic_vertex_buffer(&device, "spark_positions", spark_bytes);
        let spark_colors = helpers::create_dynamic_vertex_buffer(&device, "spark_colors", spark_bytes);

        log::info!(
            "[gpu] {}x{} format={:?} indices={} spark_capacity={}",
            width,
            height,
            format,
            geometry.indices.len(),
            geometry.spark_capacity_points
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            heart_pipeline,
            spark_pipeline,
            uniform_buffer,
            bind_group,
            heart_vertices,
            heart_indices,
            index_count: geometry.indices.len() as u32,
            spark_positions,
            spark_colors,
            spark_points: 0,
            depth_tex,
            depth_view,
            width,
            height,
            clear_color: wgpu::Color {
                r: clear_rgb[0],
                g: clear_rgb[1],
                b: clear_rgb[2],
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (tex, view) = helpers::create_depth_texture(&self.device, width, height);
            self.depth_tex.destroy();
            self.depth_tex = tex;
            self.depth_view = view;
        }
    }

    pub fn upload_mesh(&mut self, vertex_bytes: &[u8]) {
        self.queue.write_buffer(&self.heart_vertices, 0, vertex_bytes);
    }

    /// Copy the filled prefix of the spark buffers; `positions` and `colors` are flat xyz/rgb.
    pub fn upload_sparks(&mut self, positions: &[f32], colors: &[f32]) {
        self.spark_points = (positions.len().min(colors.len()) / 3) as u32;
        if self.spark_points == 0 {
            return;
        }
        self.queue
            .write_buffer(&self.spark_positions, 0, bytemuck::cast_slice(positions));
        self.queue
            .write_buffer(&self.spark_colors, 0, bytemuck::cast_slice(colors));
    }

    pub fn render(&mut self, uniforms: &FrameUniforms) -> Result<(), wgpu::SurfaceError> {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            rpass.set_pipeline(&self.heart_pipeline);
            rpass.set_vertex_buffer(0, self.heart_vertices.slice(..));
            rpass.set_index_buffer(self.heart_indices.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.index_count, 0, 0..1);

            if self.spark_points > 0 {
                rpass.set_pipeline(&self.spark_pipeline);
                rpass.set_vertex_buffer(0, self.spark_positions.slice(..));
                rpass.set_vertex_buffer(1, self.spark_colors.slice(..));
                rpass.draw(0..self.spark_points, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
