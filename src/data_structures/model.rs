//! GPU-side model data: vertices, meshes and the loaded model.
//!
//! A [`Model`] is a flat list of [`Mesh`]es in draw order plus one set of
//! [`MaterialProperties`]. Geometry is uploaded once at construction and the
//! buffers are immutable afterwards; per-frame state lives in the render loop.

use std::rc::Rc;

use wgpu::util::DeviceExt;

use super::{scene::TextureKind, texture::Texture};

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// One model vertex: position, normal, texture coordinate, in that order.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// A texture attached to a mesh: shared GPU handle, semantic slot, source
/// path (the cache key) and the shader-side name derived from the running
/// per-kind counter (`texture_diffuse1`, `texture_diffuse2`, ...).
///
/// The GPU resource itself is owned by the load's texture cache; meshes only
/// hold shared read-only handles.
#[derive(Debug, Clone)]
pub struct TextureBinding {
    pub kind: TextureKind,
    pub path: String,
    pub uniform_name: String,
    pub texture: Rc<Texture>,
}

/// Phong material values for the whole model.
///
/// The importer applies the last-processed mesh's material to the model, so
/// there is exactly one of these per [`Model`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl Default for MaterialProperties {
    // The same constants that stand in for unauthored material channels.
    fn default() -> Self {
        Self {
            ambient: [0.2, 0.2, 0.2],
            diffuse: [1.0, 1.0, 1.0],
            specular: [0.3, 0.3, 0.3],
            shininess: 1.0,
        }
    }
}

/// One drawable chunk of geometry: vertex/index buffers, texture bindings and
/// the bind group that exposes them to the shader.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    pub textures: Vec<TextureBinding>,
    pub bind_group: wgpu::BindGroup,
}

impl Mesh {
    /// Upload vertices and indices and build the material bind group.
    ///
    /// The bind group carries one texture per semantic slot; the first
    /// binding of each kind wins, missing slots fall back to the load's
    /// placeholder textures.
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        vertices: &[ModelVertex],
        indices: &[u32],
        textures: Vec<TextureBinding>,
        placeholders: &SlotDefaults,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let slot = |kind: TextureKind| -> &Texture {
            textures
                .iter()
                .find(|binding| binding.kind == kind)
                .map(|binding| binding.texture.as_ref())
                .unwrap_or_else(|| placeholders.get(kind).as_ref())
        };

        let mut entries = Vec::with_capacity(8);
        for (index, kind) in TextureKind::ALL.into_iter().enumerate() {
            let texture = slot(kind);
            entries.push(wgpu::BindGroupEntry {
                binding: 2 * index as u32,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            });
            entries.push(wgpu::BindGroupEntry {
                binding: 2 * index as u32 + 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            });
        }
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &entries,
            label: Some(&format!("{:?} material bind group", name)),
        });

        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: indices.len() as u32,
            textures,
            bind_group,
        }
    }
}

/// Per-slot fallback textures, created once per model load.
#[derive(Debug)]
pub struct SlotDefaults {
    pub diffuse: Rc<Texture>,
    pub specular: Rc<Texture>,
    pub normal: Rc<Texture>,
    pub height: Rc<Texture>,
}

impl SlotDefaults {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            diffuse: Rc::new(Texture::create_placeholder(TextureKind::Diffuse, device, queue)),
            specular: Rc::new(Texture::create_placeholder(TextureKind::Specular, device, queue)),
            normal: Rc::new(Texture::create_placeholder(TextureKind::Normal, device, queue)),
            height: Rc::new(Texture::create_placeholder(TextureKind::Height, device, queue)),
        }
    }

    pub fn get(&self, kind: TextureKind) -> &Rc<Texture> {
        match kind {
            TextureKind::Diffuse => &self.diffuse,
            TextureKind::Specular => &self.specular,
            TextureKind::Normal => &self.normal,
            TextureKind::Height => &self.height,
        }
    }
}

/// A loaded model: meshes in draw order plus the aggregated material.
///
/// `Model::empty()` is the fail-soft state after a failed import; drawing it
/// is a no-op.
#[derive(Debug, Default)]
pub struct Model {
    pub meshes: Vec<Mesh>,
    pub material: MaterialProperties,
}

impl Model {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

pub trait DrawModel<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh, uniforms: &'a wgpu::BindGroup);
    fn draw_model(&mut self, model: &'a Model, uniforms: &'a wgpu::BindGroup);
}

impl<'a, 'b> DrawModel<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh, uniforms: &'b wgpu::BindGroup) {
        self.set_bind_group(0, &mesh.bind_group, &[]);
        self.set_bind_group(1, uniforms, &[]);
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.num_elements, 0, 0..1);
    }

    fn draw_model(&mut self, model: &'b Model, uniforms: &'b wgpu::BindGroup) {
        for mesh in &model.meshes {
            self.draw_mesh(mesh, uniforms);
        }
    }
}
