use crate::mesh::{Mesh, Vertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use ferris_render::{DrawItem, Frame, LightRig, OrbitCamera, Primitive};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    ambient: [f32; 4],
    sun_dir: [f32; 4],
    sun_diffuse: [f32; 4],
    sun_specular: [f32; 4],
    lamp_pos: [f32; 4],
    lamp_diffuse: [f32; 4],
    lamp_specular: [f32; 4],
    material: [f32; 4],
}

impl Globals {
    fn new(camera: &OrbitCamera, lights: &LightRig) -> Self {
        let mut g = Self::zeroed();
        g.view_proj = camera.view_projection().to_cols_array_2d();
        g.eye = camera.eye().extend(1.0).to_array();
        g.ambient = lights.ambient.extend(1.0).to_array();
        if let Some(sun) = &lights.sun {
            g.sun_dir = sun.direction.extend(1.0).to_array();
            g.sun_diffuse = sun.diffuse.extend(1.0).to_array();
            g.sun_specular = sun.specular.extend(1.0).to_array();
        }
        if let Some(lamp) = &lights.lamp {
            g.lamp_pos = lamp.position.extend(1.0).to_array();
            g.lamp_diffuse = lamp.diffuse.extend(1.0).to_array();
            g.lamp_specular = lamp.specular.extend(1.0).to_array();
        }
        g.material = lights
            .material
            .specular
            .extend(lights.material.shininess)
            .to_array();
        g
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    normal_0: [f32; 4],
    normal_1: [f32; 4],
    normal_2: [f32; 4],
    color: [f32; 4],
}

impl From<&DrawItem> for InstanceData {
    fn from(item: &DrawItem) -> Self {
        let m = item.model.to_cols_array_2d();
        let n = item.normal_matrix();
        Self {
            model_0: m[0],
            model_1: m[1],
            model_2: m[2],
            model_3: m[3],
            normal_0: n.x_axis.extend(0.0).to_array(),
            normal_1: n.y_axis.extend(0.0).to_array(),
            normal_2: n.z_axis.extend(0.0).to_array(),
            color: item.color.to_array(),
        }
    }
}

/// Instances grouped by mesh, laid out back to back in one buffer.
struct Batches {
    instances: Vec<InstanceData>,
    /// (primitive, first instance, instance count)
    ranges: Vec<(Primitive, u32, u32)>,
}

fn batch(items: &[DrawItem], max_instances: u32) -> Batches {
    let mut instances = Vec::with_capacity(items.len());
    let mut ranges = Vec::new();
    for primitive in Primitive::ALL {
        let start = instances.len() as u32;
        for item in items.iter().filter(|i| i.primitive == primitive) {
            if instances.len() >= max_instances as usize {
                tracing::warn!("instance buffer full, dropping {:?}", item.part);
                break;
            }
            instances.push(InstanceData::from(item));
        }
        let count = instances.len() as u32 - start;
        if count > 0 {
            ranges.push((primitive, start, count));
        }
    }
    Batches { instances, ranges }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, primitive: Primitive) -> Self {
        let mesh = Mesh::for_primitive(primitive);
        let name = primitive.name();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name}_vertex_buffer")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name}_index_buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
        }
    }
}

/// wgpu-based scene renderer.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    meshes: Vec<(Primitive, GpuMesh)>,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&Globals::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
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

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                            8 => Float32x4,
                            9 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // open cylinders are visible from inside, so nothing is culled
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Self::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let meshes = Primitive::ALL
            .iter()
            .map(|&p| (p, GpuMesh::upload(device, p)))
            .collect();

        let max_instances = 256u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: u64::from(max_instances) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!("scene pipeline created for {surface_format:?}");

        Self {
            pipeline,
            globals_buffer,
            globals_bind_group,
            meshes,
            instance_buffer,
            max_instances,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame into `view`, clearing color and depth first.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &Frame,
    ) {
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals::new(&frame.camera, &frame.lights)),
        );

        let batches = batch(frame.draws.items(), self.max_instances);
        if !batches.instances.is_empty() {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&batches.instances),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let clear = frame.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(clear.r),
                            g: f64::from(clear.g),
                            b: f64::from(clear.b),
                            a: f64::from(clear.a),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            for &(primitive, first, count) in &batches.ranges {
                let Some((_, mesh)) = self.meshes.iter().find(|(p, _)| *p == primitive) else {
                    continue;
                };
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, first..first + count);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use ferris_render::{ProjectionConfig, WheelConfig};
    use ferris_sim::SimState;

    fn frame(state: &SimState) -> Frame {
        Frame::compose(state, &WheelConfig::default(), ProjectionConfig::default())
    }

    fn instance_model(i: &InstanceData) -> Mat4 {
        Mat4::from_cols_array_2d(&[i.model_0, i.model_1, i.model_2, i.model_3])
    }

    #[test]
    fn globals_layout_is_uniform_friendly() {
        assert_eq!(std::mem::size_of::<Globals>(), 64 + 9 * 16);
        assert_eq!(std::mem::size_of::<InstanceData>(), 8 * 16);
    }

    #[test]
    fn globals_flag_disabled_lights() {
        let mut state = SimState::new();
        state.lighting.point = false;
        let f = frame(&state);
        let g = Globals::new(&f.camera, &f.lights);
        assert_eq!(g.sun_dir[3], 1.0);
        assert_eq!(g.lamp_pos[3], 0.0);
        assert_eq!(g.material[3], 50.0);
        assert_eq!(g.eye, [5.0, 3.0, 0.0, 1.0]);
    }

    #[test]
    fn batches_group_by_primitive_in_order() {
        let f = frame(&SimState::new());
        let b = batch(f.draws.items(), 256);
        assert_eq!(b.instances.len(), f.draws.len());
        let summary: Vec<(Primitive, u32, u32)> = b.ranges.clone();
        assert_eq!(
            summary,
            vec![
                (Primitive::Cube, 0, 9),
                (Primitive::Cylinder, 9, 12),
                (Primitive::Quad, 21, 1),
            ]
        );
        let quad = &b.instances[21];
        assert_eq!(instance_model(quad), f.draws.items()[0].model);
    }

    #[test]
    fn batches_respect_capacity() {
        let f = frame(&SimState::new());
        let b = batch(f.draws.items(), 5);
        assert_eq!(b.instances.len(), 5);
        assert_eq!(b.ranges, vec![(Primitive::Cube, 0, 5)]);
    }

    #[test]
    fn instance_normal_matrix_matches_item() {
        let f = frame(&SimState::new());
        let base = f.draws.items()[1];
        let inst = InstanceData::from(&base);
        let n = base.normal_matrix();
        assert_eq!(inst.normal_1, n.y_axis.extend(0.0).to_array());
        assert_eq!(Vec3::from_slice(&inst.color[..3]), base.color.to_vec3());
    }
}
