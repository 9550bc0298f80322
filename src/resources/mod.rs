//! Loading of models and textures from external files.
//!
//! Both importers lower their output into [`SceneData`] first; everything
//! after that (traversal, conversion, upload) is shared. Loading is
//! synchronous and blocks until every mesh and texture is on the GPU.

use std::{
    io::{BufReader, Cursor},
    path::Path,
};

use log::warn;

use crate::data_structures::{
    model::Model,
    scene::{SceneData, SceneMaterial, SceneMesh, SceneNode},
};

pub mod mesh;
pub mod texture;

pub use mesh::MaterialPolicy;
pub use texture::TextureError;

/// Error type for model import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read model file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OBJ import failed: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("glTF import failed: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("imported scene has no root node")]
    MissingRootNode,

    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Import-time knobs.
///
/// The defaults reproduce the historical behavior: V axis flipped for OBJ
/// texture coordinates, texture decode failures swallowed into placeholders,
/// last mesh's material applied to the whole model.
#[derive(Debug, Clone)]
pub struct LoadSettings {
    /// Flip the V texture axis at import (OBJ only; glTF already matches).
    pub flip_v: bool,
    /// Turn per-texture decode failures into hard [`TextureError`]s instead
    /// of placeholder substitution.
    pub strict_textures: bool,
    pub material_policy: MaterialPolicy,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            flip_v: true,
            strict_textures: false,
            material_policy: MaterialPolicy::default(),
        }
    }
}

fn chunk3(values: &[f32]) -> Vec<[f32; 3]> {
    values.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}

/// Parse an OBJ/MTL pair into scene data.
///
/// OBJ has no node hierarchy, so every mesh hangs off a synthetic root node.
/// Triangulation and index unification are delegated to tobj's load options.
pub async fn load_scene_obj(path: &Path, settings: &LoadSettings) -> Result<SceneData, ImportError> {
    let display = path.display().to_string();
    let obj_text = std::fs::read_to_string(path).map_err(|source| ImportError::Unreadable {
        path: display.clone(),
        source,
    })?;
    let obj_cursor = Cursor::new(obj_text);
    let mut obj_reader = BufReader::new(obj_cursor);
    let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();

    let (models, obj_materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| {
            let mtl_path = dir.join(&p);
            async move {
                match std::fs::read_to_string(&mtl_path) {
                    Ok(text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(text))),
                    Err(_) => Err(tobj::LoadError::OpenFileFailed),
                }
            }
        },
    )
    .await?;

    // A broken or absent MTL leaves the model untextured rather than unloadable.
    let obj_materials = obj_materials.unwrap_or_else(|err| {
        warn!("materials for {display} could not be loaded: {err}");
        Vec::new()
    });

    let materials = obj_materials
        .iter()
        .map(|m| SceneMaterial {
            name: m.name.clone(),
            ambient: m.ambient.unwrap_or([0.0; 3]),
            diffuse: m.diffuse.unwrap_or([0.0; 3]),
            specular: m.specular.unwrap_or([0.0; 3]),
            shininess: m.shininess.unwrap_or(0.0),
            diffuse_textures: m.diffuse_texture.clone().into_iter().collect(),
            specular_textures: m.specular_texture.clone().into_iter().collect(),
            // OBJ bump maps carry normal data in practice, and the ambient
            // map doubles as the height slot. See TextureKind.
            normal_textures: m.normal_texture.clone().into_iter().collect(),
            height_textures: m.ambient_texture.clone().into_iter().collect(),
        })
        .collect();

    let meshes: Vec<SceneMesh> = models
        .iter()
        .map(|m| SceneMesh {
            name: m.name.clone(),
            positions: chunk3(&m.mesh.positions),
            normals: chunk3(&m.mesh.normals),
            tex_coords: m
                .mesh
                .texcoords
                .chunks_exact(2)
                .map(|uv| if settings.flip_v { [uv[0], 1.0 - uv[1]] } else { [uv[0], uv[1]] })
                .collect(),
            indices: m.mesh.indices.clone(),
            material: m.mesh.material_id,
        })
        .collect();

    let root = SceneNode {
        name: display.clone(),
        meshes: (0..meshes.len()).collect(),
        children: Vec::new(),
    };

    Ok(SceneData {
        name: display,
        nodes: vec![root],
        meshes,
        materials,
        root: Some(0),
    })
}

/// Parse a glTF/GLB file into scene data, keeping its node hierarchy.
///
/// Only texture references by URI participate in the path cache; textures
/// embedded in buffer views are skipped with a warning.
pub fn load_scene_gltf(path: &Path) -> Result<SceneData, ImportError> {
    let (document, buffers, _images) = gltf::import(path)?;
    let display = path.display().to_string();

    fn uri_of(display: &str, texture: gltf::Texture<'_>) -> Option<String> {
        match texture.source().source() {
            gltf::image::Source::Uri { uri, .. } => Some(uri.to_string()),
            gltf::image::Source::View { .. } => {
                warn!("{display}: embedded textures are not cached by path, skipping one");
                None
            }
        }
    }

    let materials: Vec<SceneMaterial> = document
        .materials()
        .map(|material| {
            let pbr = material.pbr_metallic_roughness();
            let base = pbr.base_color_factor();
            let mut scene_material = SceneMaterial {
                name: material.name().unwrap_or("").to_string(),
                diffuse: [base[0], base[1], base[2]],
                ..Default::default()
            };
            if let Some(info) = pbr.base_color_texture() {
                scene_material
                    .diffuse_textures
                    .extend(uri_of(&display, info.texture()));
            }
            if let Some(normal) = material.normal_texture() {
                scene_material
                    .normal_textures
                    .extend(uri_of(&display, normal.texture()));
            }
            // Occlusion is the ambient-style channel, which feeds the height slot.
            if let Some(occlusion) = material.occlusion_texture() {
                scene_material
                    .height_textures
                    .extend(uri_of(&display, occlusion.texture()));
            }
            scene_material
        })
        .collect();

    let mut meshes = Vec::new();
    let mut mesh_map: Vec<Vec<usize>> = Vec::new();
    for mesh in document.meshes() {
        let mut primitive_ids = Vec::new();
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .map(|iter| iter.collect())
                .unwrap_or_default();
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_default();
            let tex_coords: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().collect())
                .unwrap_or_default();
            let indices: Vec<u32> = reader
                .read_indices()
                .map(|iter| iter.into_u32().collect())
                .unwrap_or_else(|| (0..positions.len() as u32).collect());

            primitive_ids.push(meshes.len());
            meshes.push(SceneMesh {
                name: mesh.name().unwrap_or("unnamed").to_string(),
                positions,
                normals,
                tex_coords,
                indices,
                material: primitive.material().index(),
            });
        }
        mesh_map.push(primitive_ids);
    }

    let mut nodes: Vec<SceneNode> = document
        .nodes()
        .map(|node| SceneNode {
            name: node.name().unwrap_or("unnamed").to_string(),
            meshes: node
                .mesh()
                .map(|mesh| mesh_map[mesh.index()].clone())
                .unwrap_or_default(),
            children: node.children().map(|child| child.index()).collect(),
        })
        .collect();

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(ImportError::MissingRootNode)?;
    let roots: Vec<usize> = scene.nodes().map(|node| node.index()).collect();
    let root = match roots.as_slice() {
        [] => return Err(ImportError::MissingRootNode),
        [single] => *single,
        _ => {
            nodes.push(SceneNode {
                name: "root".to_string(),
                meshes: Vec::new(),
                children: roots,
            });
            nodes.len() - 1
        }
    };

    Ok(SceneData {
        name: display,
        nodes,
        meshes,
        materials,
        root: Some(root),
    })
}

/// Import a model file and upload it, dispatching on the file extension.
pub async fn load_model(
    path: impl AsRef<Path>,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    settings: &LoadSettings,
) -> Result<Model, ImportError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let scene = match extension.as_str() {
        "obj" => load_scene_obj(path, settings).await?,
        "gltf" | "glb" => load_scene_gltf(path)?,
        other => return Err(ImportError::UnsupportedFormat(other.to_string())),
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let model = mesh::from_scene(&scene, dir, device, queue, settings)?;
    log::info!(
        "loaded {} with {} meshes across {} nodes",
        scene.name,
        model.meshes.len(),
        scene.nodes.len()
    );
    Ok(model)
}

/// Fail-soft wrapper around [`load_model`]: a broken asset is logged and the
/// caller gets the empty model, which draws as a no-op. Call [`load_model`]
/// directly to handle the error instead.
pub async fn load_model_or_empty(
    path: impl AsRef<Path>,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    settings: &LoadSettings,
) -> Model {
    let path = path.as_ref();
    match load_model(path, device, queue, settings).await {
        Ok(model) => model,
        Err(err) => {
            log::error!(
                "import of {} failed, rendering continues with an empty model: {err}",
                path.display()
            );
            Model::empty()
        }
    }
}
