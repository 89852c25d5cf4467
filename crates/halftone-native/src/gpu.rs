use glam::Vec2;
use halftone_core::{RectMark, Rgba, Stroke, Surface, Viewport};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    resolution: [f32; 2],
    _pad: [f32; 2],
}

/// One SDF shape. `shape` packs corner radius, stroke width and dash on/off;
/// `rotation` is the (cos, sin) of the turn about `center`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeInstance {
    pub center: [f32; 2],
    pub half_size: [f32; 2],
    pub color: [f32; 4],
    pub shape: [f32; 4],
    pub rotation: [f32; 2],
}

const UPRIGHT: [f32; 2] = [1.0, 0.0];

impl ShapeInstance {
    // Location 0 is the quad corner.
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x2
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub fn disc(center: Vec2, radius: f32, color: Rgba) -> Self {
        let r = radius.max(0.0);
        Self {
            center: center.to_array(),
            half_size: [r, r],
            color: color.to_array(),
            shape: [r, 0.0, 0.0, 0.0],
            rotation: UPRIGHT,
        }
    }

    pub fn ring(center: Vec2, radius: f32, stroke: &Stroke) -> Self {
        let r = radius.max(0.0);
        let (on, off) = match stroke.dash.as_slice() {
            [on, off, ..] => (*on, *off),
            [on] => (*on, *on),
            [] => (0.0, 0.0),
        };
        Self {
            center: center.to_array(),
            half_size: [r, r],
            color: stroke.color.to_array(),
            shape: [r, stroke.width.max(0.0), on, off],
            rotation: UPRIGHT,
        }
    }

    pub fn rounded_rect(rect: &RectMark, color: Rgba) -> Self {
        let (sin, cos) = rect.rotation_deg.to_radians().sin_cos();
        Self {
            center: rect.center().to_array(),
            half_size: [rect.width.max(0.0) * 0.5, rect.height.max(0.0) * 0.5],
            color: color.to_array(),
            shape: [rect.clamped_corner(), 0.0, 0.0, 0.0],
            rotation: [cos, sin],
        }
    }
}

/// Two triangles spanning [-1, 1]; the vertex shader stretches them per shape.
const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

fn quad_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

/// A frame recorded as GPU instances, drawn by [`GpuState::render`].
pub struct ShapeBatch {
    pub viewport: Viewport,
    pub background: Rgba,
    pub instances: Vec<ShapeInstance>,
}

impl Default for ShapeBatch {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            background: Rgba::BLACK,
            instances: Vec::new(),
        }
    }
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for ShapeBatch {
    fn begin(&mut self, viewport: Viewport, background: Rgba) {
        self.viewport = viewport;
        self.background = background;
        self.instances.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.instances.push(ShapeInstance::disc(center, radius, color));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.instances.push(ShapeInstance::ring(center, radius, stroke));
    }

    fn fill_rounded_rect(&mut self, rect: &RectMark, color: Rgba) {
        self.instances.push(ShapeInstance::rounded_rect(rect, color));
    }
}

/// Viewport-size uniform and the bind group exposing it.
struct Globals {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Globals {
    fn new(device: &wgpu::Device) -> (Self, wgpu::BindGroupLayout) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        (Self { buffer, bind_group }, layout)
    }

    /// Shapes are laid out in logical pixels.
    fn write(&self, queue: &wgpu::Queue, viewport: Viewport) {
        let uniforms = Uniforms {
            resolution: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniforms));
    }
}

const INITIAL_INSTANCE_CAPACITY: usize = 4096;

/// Instance vertex buffer, reallocated at the next power of two when a frame outgrows it.
struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shape_instances"),
            size: (std::mem::size_of::<ShapeInstance>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer, capacity }
    }

    fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[ShapeInstance],
    ) {
        if instances.len() > self.capacity {
            *self = Self::new(device, instances.len().next_power_of_two());
            log::debug!("[gpu] instance buffer grown to {}", self.capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
        }
    }
}

/// Colours are authored in sRGB already; a linear target keeps them as written.
fn pick_format(caps: &wgpu::SurfaceCapabilities) -> anyhow::Result<wgpu::TextureFormat> {
    caps.formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| caps.formats.first().copied())
        .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))
}

fn shape_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    globals_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("shapes"),
        source: wgpu::ShaderSource::Wgsl(halftone_core::DOTS_WGSL.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("shapes"),
        bind_group_layouts: &[globals_layout],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("shapes"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[quad_layout(), ShapeInstance::layout()],
            compilation_options: Default::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn clear_color(bg: Rgba) -> wgpu::Color {
    wgpu::Color {
        r: bg.r as f64,
        g: bg.g as f64,
        b: bg.b as f64,
        a: bg.a as f64,
    }
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    globals: Globals,
    quad: wgpu::Buffer,
    instances: InstanceBuffer,
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let (globals, globals_layout) = Globals::new(&device);
        let pipeline = shape_pipeline(&device, format, &globals_layout);
        let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instances = InstanceBuffer::new(&device, INITIAL_INSTANCE_CAPACITY);

        log::info!(
            "[gpu] {:?} {}x{} format={:?}",
            adapter.get_info().backend,
            config.width,
            config.height,
            format
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            globals,
            quad,
            instances,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, batch: &ShapeBatch) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.globals.write(&self.queue, batch.viewport);
        self.instances
            .upload(&self.device, &self.queue, &batch.instances);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("shapes"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shapes"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(batch.background)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.globals.bind_group, &[]);
            pass.set_vertex_buffer(0, self.quad.slice(..));
            pass.set_vertex_buffer(1, self.instances.buffer.slice(..));
            pass.draw(0..QUAD_CORNERS.len() as u32, 0..batch.instances.len() as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halftone_core::{default_patterns, App, FieldParams, ViewMode};

    #[test]
    fn instance_layout_matches_shader_locations() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), 56);
        assert_eq!(std::mem::size_of::<Uniforms>(), 16);
        let offsets: Vec<u64> = ShapeInstance::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 8, 16, 32, 48]);
        let locations: Vec<u32> = ShapeInstance::ATTRIBUTES
            .iter()
            .map(|a| a.shader_location)
            .collect();
        assert_eq!(locations, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn dashed_strokes_carry_dash_lengths() {
        let mut batch = ShapeBatch::new();
        batch.begin(Viewport::new(10.0, 10.0), Rgba::BLACK);
        batch.stroke_circle(Vec2::ZERO, 5.0, &Stroke::dashed(Rgba::WHITE, 1.0, &[2.0, 4.0]));
        batch.stroke_circle(Vec2::ZERO, 3.0, &Stroke::solid(Rgba::WHITE, 1.0));
        assert_eq!(batch.instances[0].shape, [5.0, 1.0, 2.0, 4.0]);
        assert_eq!(batch.instances[1].shape, [3.0, 1.0, 0.0, 0.0]);
        assert_eq!(batch.instances[0].rotation, UPRIGHT);
    }

    #[test]
    fn rotated_marks_pack_their_angle() {
        let mark = RectMark {
            x: 0.0,
            y: 0.0,
            width: 20.0,
            height: 10.0,
            corner: 2.0,
            rotation_deg: 90.0,
        };
        let inst = ShapeInstance::rounded_rect(&mark, Rgba::BLACK);
        assert_eq!(inst.center, [10.0, 5.0]);
        assert_eq!(inst.half_size, [10.0, 5.0]);
        assert!(inst.rotation[0].abs() < 1e-6);
        assert!((inst.rotation[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn batch_holds_one_instance_per_shape() {
        let app = App::new(
            Viewport::new(300.0, 200.0),
            FieldParams::default(),
            default_patterns(),
            4,
        )
        .unwrap()
        .with_mode(ViewMode::Marks);
        let mut batch = ShapeBatch::new();
        app.draw(&mut batch);
        assert_eq!(batch.instances.len(), app.marks().marks().len());
        assert_eq!(batch.background, Rgba::WHITE);
        for inst in &batch.instances {
            assert!(inst.shape[0] <= inst.half_size[0].min(inst.half_size[1]) + 1e-4);
        }
    }
}
