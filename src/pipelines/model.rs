//! Render pipeline and uniforms for the imported model.

use cgmath::{Matrix, Matrix4, SquareMatrix, Vector4};

use crate::{
    data_structures::{
        model::{MaterialProperties, ModelVertex, Vertex},
        texture::Texture,
    },
    resources::texture::material_texture_layout,
};

/// Per-drawable uniform block for the model shader.
///
/// Field order and padding mirror the WGSL struct in `model_shader.wgsl`;
/// vec3 columns are padded to 16 bytes as uniform layout demands.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    // mat3x3 with vec4-aligned columns
    normal_matrix: [[f32; 4]; 3],
    light_position: [f32; 4],
    light_intensity: [f32; 3],
    _padding: u32,
    ka: [f32; 3],
    _padding2: u32,
    kd: [f32; 3],
    _padding3: u32,
    ks: [f32; 3],
    shininess: f32,
}

impl ModelUniforms {
    /// Assemble the block from the frame's matrices, the fixed point light
    /// and the model's material.
    ///
    /// The normal matrix is the upper 3x3 of the transposed inverse of
    /// view * model; the light position is given in world space and
    /// transformed into view space here.
    pub fn new(
        model: Matrix4<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
        light_position: Vector4<f32>,
        light_intensity: [f32; 3],
        material: &MaterialProperties,
    ) -> Self {
        let mview = view * model;
        let inverse = mview.invert().unwrap_or_else(Matrix4::identity).transpose();
        let pad = |column: Vector4<f32>| [column.x, column.y, column.z, 0.0];

        Self {
            model: model.into(),
            view: view.into(),
            projection: projection.into(),
            normal_matrix: [pad(inverse.x), pad(inverse.y), pad(inverse.z)],
            light_position: (view * light_position).into(),
            light_intensity,
            _padding: 0,
            ka: material.ambient,
            _padding2: 0,
            kd: material.diffuse,
            _padding3: 0,
            ks: material.specular,
            shininess: material.shininess,
        }
    }
}

/// Bind group layout for a single uniform buffer visible to both stages.
pub fn mk_uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
        label: Some(label),
    })
}

pub fn mk_uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some(label),
    })
}

pub fn mk_model_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    uniform_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Model Pipeline Layout"),
        bind_group_layouts: &[Some(&material_texture_layout(device)), Some(uniform_layout)],
        immediate_size: 0,
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Model Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("model_shader.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        config.format,
        Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        }),
        Some(Texture::DEPTH_FORMAT),
        &[ModelVertex::desc()],
        shader,
    )
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_format: Option<wgpu::TextureFormat>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: wgpu::ShaderModuleDescriptor,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(shader);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: Some(true),
            depth_compare: Some(wgpu::CompareFunction::Less),
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}
