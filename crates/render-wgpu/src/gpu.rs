use crate::mesh::{self, MeshData, Vertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use deskscape_assets::TextureImage;
use deskscape_camera::CameraFrame;
use deskscape_scene::{
    DrawCommand, INVALID_SLOT, LightRig, LightSource, MAX_LIGHTS, MaterialBank, ShapeKind,
    TextureBank,
};
use std::collections::BTreeMap;
use wgpu::util::DeviceExt;

/// Draw slots preallocated in the per-draw uniform buffer. The scripted
/// scene issues far fewer; overflow is dropped with a warning.
pub const MAX_DRAWS: usize = 128;

/// Dynamic-offset stride per draw slot. 256 satisfies
/// `min_uniform_buffer_offset_alignment` on every backend wgpu supports.
const DRAW_STRIDE: u64 = 256;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LightUniform {
    position: [f32; 4],
    ambient_color: [f32; 4],
    diffuse_color: [f32; 4],
    specular_color: [f32; 4],
    // x: enabled, y: focal strength, z: specular intensity
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    view_position: [f32; 4],
    lights: [LightUniform; MAX_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    // rgb: ambient color, w: ambient strength
    ambient: [f32; 4],
    diffuse: [f32; 4],
    // rgb: specular color, w: shininess
    specular: [f32; 4],
    uv_scale: [f32; 4],
    // x: base texture, y: overlay texture, z: specular map, w: lighting
    flags: [u32; 4],
}

/// Shading constants applied when a command names no material preset:
/// full ambient and diffuse response, no specular highlight, so the base
/// color passes through the light bank unchanged in tone.
fn draw_uniforms(cmd: &DrawCommand, materials: &MaterialBank, flags: [u32; 4]) -> DrawUniforms {
    let material = cmd.material.as_deref().and_then(|tag| materials.find(tag));
    let (ambient, diffuse, specular) = match material {
        Some(m) => (
            [m.ambient_color.x, m.ambient_color.y, m.ambient_color.z, m.ambient_strength],
            [m.diffuse_color.x, m.diffuse_color.y, m.diffuse_color.z, 0.0],
            [m.specular_color.x, m.specular_color.y, m.specular_color.z, m.shininess],
        ),
        None => (
            [1.0, 1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ),
    };
    DrawUniforms {
        model: cmd.transform.matrix().to_cols_array_2d(),
        color: cmd.color.to_array(),
        ambient,
        diffuse,
        specular,
        uv_scale: [cmd.uv_scale.x, cmd.uv_scale.y, 0.0, 0.0],
        flags,
    }
}

fn light_uniform(light: &LightSource) -> LightUniform {
    LightUniform {
        position: [light.position.x, light.position.y, light.position.z, 0.0],
        ambient_color: [
            light.ambient_color.x,
            light.ambient_color.y,
            light.ambient_color.z,
            0.0,
        ],
        diffuse_color: [
            light.diffuse_color.x,
            light.diffuse_color.y,
            light.diffuse_color.z,
            0.0,
        ],
        specular_color: [
            light.specular_color.x,
            light.specular_color.y,
            light.specular_color.z,
            0.0,
        ],
        params: [
            if light.enabled { 1.0 } else { 0.0 },
            light.focal_strength,
            light.specular_intensity,
            0.0,
        ],
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.index_count(),
        }
    }
}

/// wgpu-based desk scene renderer.
///
/// Uploads the five basic meshes once, then walks the frame's draw command
/// list: one dynamic-offset uniform slot and one indexed draw per command.
/// Texture bind groups are cached per (base, overlay, specular-map) slot
/// triple; unresolved slots fall back to a 1x1 white texture so untextured
/// draws share the same pipeline.
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback_view: wgpu::TextureView,
    texture_views: Vec<wgpu::TextureView>,
    texture_bind_groups: BTreeMap<(i32, i32, i32), wgpu::BindGroup>,
    plane: GpuMesh,
    box_: GpuMesh,
    sphere: GpuMesh,
    cylinder: GpuMesh,
    prism: GpuMesh,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw_uniforms"),
            size: DRAW_STRIDE * MAX_DRAWS as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let draw_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw_bind_group"),
            layout: &draw_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniforms>() as u64),
                }),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                texture_entry(1),
                texture_entry(2),
                texture_entry(3),
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("scene_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let fallback_view = create_white_texture(device, queue);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&frame_layout, &draw_layout, &texture_layout],
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
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Planes are viewed from both sides (walls, displays), so no
                // back-face culling.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            draw_buffer,
            draw_bind_group,
            texture_layout,
            sampler,
            fallback_view,
            texture_views: Vec::new(),
            texture_bind_groups: BTreeMap::new(),
            plane: GpuMesh::upload(device, "plane_mesh", &mesh::plane_mesh()),
            box_: GpuMesh::upload(device, "box_mesh", &mesh::box_mesh()),
            sphere: GpuMesh::upload(device, "sphere_mesh", &mesh::sphere_mesh()),
            cylinder: GpuMesh::upload(device, "cylinder_mesh", &mesh::cylinder_mesh()),
            prism: GpuMesh::upload(device, "prism_mesh", &mesh::prism_mesh()),
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

    /// Upload decoded bitmaps in slot order. Invalidates the bind-group
    /// cache, so this is a startup-time operation.
    pub fn upload_textures(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        images: &[TextureImage],
    ) {
        self.texture_views.clear();
        self.texture_bind_groups.clear();
        for image in images {
            let size = wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            };
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some(&image.tag),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            queue.write_texture(
                texture.as_image_copy(),
                &image.pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * image.width),
                    rows_per_image: Some(image.height),
                },
                size,
            );
            self.texture_views.push(texture.create_view(&Default::default()));
        }
        tracing::info!(count = images.len(), "scene textures uploaded");
    }

    /// Render one frame of the scripted scene.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &CameraFrame,
        commands: &[DrawCommand],
        materials: &MaterialBank,
        textures: &mut TextureBank,
        lights: &LightRig,
    ) {
        let mut light_uniforms = [LightUniform::zeroed(); MAX_LIGHTS];
        for (slot, light) in lights.lights.iter().enumerate() {
            light_uniforms[slot] = light_uniform(light);
        }
        queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms {
                view: frame.view.to_cols_array_2d(),
                projection: frame.projection.to_cols_array_2d(),
                view_position: [frame.eye.x, frame.eye.y, frame.eye.z, 1.0],
                lights: light_uniforms,
            }),
        );

        if commands.len() > MAX_DRAWS {
            tracing::warn!(
                count = commands.len(),
                max = MAX_DRAWS,
                "draw list exceeds uniform slots, tail dropped"
            );
        }
        let commands = &commands[..commands.len().min(MAX_DRAWS)];

        // Stage uniforms and resolve texture bind groups before the pass,
        // since creating bind groups borrows the cache mutably.
        let mut slot_keys = Vec::with_capacity(commands.len());
        for (i, cmd) in commands.iter().enumerate() {
            let key = self.resolve_slots(cmd, textures);
            let flags = [
                (key.0 >= 0) as u32,
                (key.1 >= 0) as u32,
                (key.2 >= 0) as u32,
                1,
            ];
            queue.write_buffer(
                &self.draw_buffer,
                i as u64 * DRAW_STRIDE,
                bytemuck::bytes_of(&draw_uniforms(cmd, materials, flags)),
            );
            self.ensure_bind_group(device, key);
            slot_keys.push(key);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.0,
                            g: 0.0,
                            b: 0.0,
                            a: 1.0,
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
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for (i, cmd) in commands.iter().enumerate() {
                let offset = (i as u64 * DRAW_STRIDE) as u32;
                pass.set_bind_group(1, &self.draw_bind_group, &[offset]);
                pass.set_bind_group(2, &self.texture_bind_groups[&slot_keys[i]], &[]);

                let mesh = self.mesh_for(cmd.shape);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn mesh_for(&self, shape: ShapeKind) -> &GpuMesh {
        match shape {
            ShapeKind::Plane => &self.plane,
            ShapeKind::Box => &self.box_,
            ShapeKind::Sphere => &self.sphere,
            ShapeKind::Cylinder => &self.cylinder,
            ShapeKind::Prism => &self.prism,
        }
    }

    /// Map a command's texture tags onto uploaded slots. A missing tag or a
    /// registered tag with no uploaded bitmap resolves to the sentinel and
    /// draws untextured.
    fn resolve_slots(&self, cmd: &DrawCommand, textures: &mut TextureBank) -> (i32, i32, i32) {
        let mut resolve = |tag: Option<&str>| -> i32 {
            let slot = match tag {
                Some(tag) => textures.slot_or_invalid(tag),
                None => INVALID_SLOT,
            };
            if slot >= 0 && (slot as usize) < self.texture_views.len() {
                slot
            } else {
                INVALID_SLOT
            }
        };
        (
            resolve(cmd.texture.as_deref()),
            resolve(cmd.texture2.as_deref()),
            resolve(cmd.specular_map.as_deref()),
        )
    }

    fn ensure_bind_group(&mut self, device: &wgpu::Device, key: (i32, i32, i32)) {
        if self.texture_bind_groups.contains_key(&key) {
            return;
        }
        let view_for = |slot: i32| -> &wgpu::TextureView {
            if slot >= 0 {
                &self.texture_views[slot as usize]
            } else {
                &self.fallback_view
            }
        };
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view_for(key.0)),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(view_for(key.1)),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(view_for(key.2)),
                },
            ],
        });
        self.texture_bind_groups.insert(key, bind_group);
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
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
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn create_white_texture(device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: 1,
        height: 1,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("white_fallback"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        texture.as_image_copy(),
        &[255, 255, 255, 255],
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: Some(1),
        },
        size,
    );
    texture.create_view(&Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn draw_uniforms_fit_one_slot() {
        assert!(std::mem::size_of::<DrawUniforms>() as u64 <= DRAW_STRIDE);
    }

    #[test]
    fn frame_uniforms_have_no_padding_surprises() {
        // Two mat4s, the view position, and four 80-byte light records.
        assert_eq!(
            std::mem::size_of::<FrameUniforms>(),
            64 * 2 + 16 + MAX_LIGHTS * std::mem::size_of::<LightUniform>()
        );
        assert_eq!(std::mem::size_of::<LightUniform>(), 80);
    }

    #[test]
    fn material_preset_flows_into_uniforms() {
        let materials = MaterialBank::desk_presets();
        let cmd = DrawCommand::new(ShapeKind::Box).material("wood");
        let u = draw_uniforms(&cmd, &materials, [0, 0, 0, 1]);
        assert_eq!(u.diffuse[..3], [0.7, 0.7, 0.6]);
        assert_eq!(u.specular[3], 32.0);
        assert_eq!(u.ambient[3], 0.3);
    }

    #[test]
    fn missing_material_uses_neutral_shading() {
        let materials = MaterialBank::desk_presets();
        let cmd = DrawCommand::new(ShapeKind::Sphere).color(0.5, 0.25, 1.0, 1.0);
        let u = draw_uniforms(&cmd, &materials, [0, 0, 0, 1]);
        assert_eq!(u.ambient, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(u.diffuse[..3], [1.0, 1.0, 1.0]);
        assert_eq!(u.specular[..3], [0.0, 0.0, 0.0]);
        assert_eq!(u.color, [0.5, 0.25, 1.0, 1.0]);
    }

    #[test]
    fn disabled_light_carries_zero_enable_flag() {
        let off = light_uniform(&LightSource::default());
        assert_eq!(off.params[0], 0.0);

        let on = light_uniform(&LightSource {
            enabled: true,
            position: Vec3::new(10.0, 20.0, 12.0),
            focal_strength: 2.0,
            specular_intensity: 0.005,
            ..Default::default()
        });
        assert_eq!(on.params, [1.0, 2.0, 0.005, 0.0]);
        assert_eq!(on.position[..3], [10.0, 20.0, 12.0]);
    }
}
