use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::canvas::{ColorUniform, ResolutionUniform};
use crate::color::{HIGHLIGHT_COLOR, to_wgpu_color};
use crate::drawing::{Shape, ShapeId};
use crate::error::RenderError;
use crate::geometry::{DrawMode, Geometry};
use crate::vertex::Vertex;

/// One shape's worth of work for a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub shape_id: ShapeId,
    pub geometry: Geometry,
    pub color: ColorUniform,
}

/// Orders a frame: committed shapes in collection order, then the
/// provisional shape on top. The selected shape is painted in the highlight
/// color without touching its stored color.
pub fn plan_frame(
    shapes: &[Shape],
    provisional: Option<&Shape>,
    selected: Option<ShapeId>,
) -> Vec<DrawCommand> {
    shapes
        .iter()
        .chain(provisional)
        .map(|shape| {
            let color = if Some(shape.id) == selected {
                HIGHLIGHT_COLOR
            } else {
                shape.color.as_str()
            };
            DrawCommand {
                shape_id: shape.id,
                geometry: Geometry::for_shape(shape),
                color: ColorUniform::from_hex(color),
            }
        })
        .collect()
}

/// Side of the square viewport the canvas is drawn into.
///
/// Normally the canvas size itself. A surface smaller than the canvas cuts it
/// down so the viewport stays inside the render target, keeping one canvas
/// pixel per surface pixel.
pub fn viewport_extent(canvas_size: u32, surface_width: u32, surface_height: u32) -> u32 {
    canvas_size.min(surface_width).min(surface_height).max(1)
}

/// GPU resources for a single draw, released once the frame is submitted.
struct PreparedDraw {
    mode: DrawMode,
    vertex: wgpu::Buffer,
    index: Option<wgpu::Buffer>,
    count: u32,
    color_bind_group: wgpu::BindGroup,
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    triangle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    resolution_buffer: wgpu::Buffer,
    resolution_bind_group: wgpu::BindGroup,
    color_bind_group_layout: wgpu::BindGroupLayout,
    viewport: u32,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, canvas_size: u32) -> Result<Self, RenderError> {
        let mut size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            size = winit::dpi::PhysicalSize::new(canvas_size, canvas_size);
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::UnsupportedContext(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::UnsupportedContext(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| RenderError::UnsupportedContext(e.to_string()))?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Hex colors are already display values; an sRGB target would re-encode them.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| {
                RenderError::UnsupportedContext("surface reports no texture formats".into())
            })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let viewport = viewport_extent(canvas_size, size.width, size.height);
        let resolution_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Resolution Uniform Buffer"),
            contents: bytemuck::cast_slice(&[ResolutionUniform::new(viewport)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let resolution_bind_group_layout =
            uniform_bind_group_layout(&device, wgpu::ShaderStages::VERTEX, "resolution_bind_group_layout");
        let color_bind_group_layout =
            uniform_bind_group_layout(&device, wgpu::ShaderStages::FRAGMENT, "color_bind_group_layout");

        let resolution_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &resolution_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: resolution_buffer.as_entire_binding(),
            }],
            label: Some("resolution_bind_group"),
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../data/shaders/shape.wgsl").into()),
        });
        if let Some(err) = device.pop_error_scope().await {
            return Err(RenderError::ShaderCompile(err.to_string()));
        }

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&resolution_bind_group_layout, &color_bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let triangle_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            wgpu::PrimitiveTopology::TriangleList,
            "Triangle Pipeline",
        );
        let line_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            wgpu::PrimitiveTopology::LineList,
            "Line Pipeline",
        );
        if let Some(err) = device.pop_error_scope().await {
            return Err(RenderError::ShaderLink(err.to_string()));
        }

        log::info!(
            "Renderer initialized: surface {}x{}, canvas {}px, format {:?}",
            size.width,
            size.height,
            canvas_size,
            surface_format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            triangle_pipeline,
            line_pipeline,
            resolution_buffer,
            resolution_bind_group,
            color_bind_group_layout,
            viewport,
        })
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigures the surface, the viewport and the resolution uniform.
    /// Shapes are not rescaled.
    pub fn resize(&mut self, width: u32, height: u32, canvas_size: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
        self.viewport = viewport_extent(canvas_size, self.config.width, self.config.height);
        self.queue.write_buffer(
            &self.resolution_buffer,
            0,
            bytemuck::cast_slice(&[ResolutionUniform::new(self.viewport)]),
        );
    }

    pub fn render(
        &mut self,
        shapes: &[Shape],
        provisional: Option<&Shape>,
        background: &str,
        selected: Option<ShapeId>,
    ) -> Result<(), wgpu::SurfaceError> {
        let draws: Vec<PreparedDraw> = plan_frame(shapes, provisional, selected)
            .iter()
            .map(|command| self.upload(command))
            .collect();

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(to_wgpu_color(background)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // Pixel space maps onto the top-left canvas square, not the whole surface.
            let extent = self.viewport as f32;
            render_pass.set_viewport(0.0, 0.0, extent, extent, 0.0, 1.0);

            for draw in &draws {
                let pipeline = match draw.mode {
                    DrawMode::Triangles => &self.triangle_pipeline,
                    DrawMode::Lines => &self.line_pipeline,
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &self.resolution_bind_group, &[]);
                render_pass.set_bind_group(1, &draw.color_bind_group, &[]);
                render_pass.set_vertex_buffer(0, draw.vertex.slice(..));

                match &draw.index {
                    Some(index) => {
                        render_pass.set_index_buffer(index.slice(..), wgpu::IndexFormat::Uint16);
                        render_pass.draw_indexed(0..draw.count, 0, 0..1);
                    }
                    None => render_pass.draw(0..draw.count, 0..1),
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn upload(&self, command: &DrawCommand) -> PreparedDraw {
        log::trace!(
            "Drawing shape {} ({} vertices, {:?})",
            command.shape_id,
            command.geometry.vertices.len(),
            command.geometry.mode
        );

        let vertex = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Vertex Buffer"),
                contents: bytemuck::cast_slice(&command.geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let (index, count) = if command.geometry.indices.is_empty() {
            (None, command.geometry.vertices.len() as u32)
        } else {
            let index = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Shape Index Buffer"),
                    contents: bytemuck::cast_slice(&command.geometry.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            (Some(index), command.geometry.indices.len() as u32)
        };

        let color_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Color Buffer"),
                contents: bytemuck::cast_slice(&[command.color]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let color_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.color_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: color_buffer.as_entire_binding(),
            }],
            label: Some("shape_color_bind_group"),
        });

        PreparedDraw {
            mode: command.geometry.mode,
            vertex,
            index,
            count,
            color_bind_group,
        }
    }
}

fn uniform_bind_group_layout(
    device: &wgpu::Device,
    visibility: wgpu::ShaderStages,
    label: &str,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // The y flip reverses winding, so both faces must be kept.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}
