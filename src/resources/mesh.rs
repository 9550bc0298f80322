//! Conversion from imported scene data to GPU meshes.
//!
//! Pure vertex/material assembly lives here so it can be tested without a
//! device; the GPU upload at the end goes through [`Mesh::new`].

use std::path::Path;

use cgmath::{InnerSpace, Vector3};
use log::warn;

use crate::{
    data_structures::{
        model::{MaterialProperties, Mesh, Model, ModelVertex, SlotDefaults, TextureBinding},
        scene::{SceneData, SceneMaterial, SceneMesh, TextureKind},
    },
    resources::{ImportError, LoadSettings, texture::{TextureCache, material_texture_layout}},
};

/// How per-mesh materials are folded into the single model-level material.
///
/// The historical behavior is `LastMeshWins`: every processed mesh overwrites
/// the model's material, so only the final mesh's values survive. Assets have
/// been authored against that quirk, hence it stays the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaterialPolicy {
    #[default]
    LastMeshWins,
    FirstMeshWins,
}

const AMBIENT_FALLBACK: [f32; 3] = [0.2, 0.2, 0.2];
const DIFFUSE_FALLBACK: [f32; 3] = [1.0, 1.0, 1.0];
const SPECULAR_FALLBACK: [f32; 3] = [0.3, 0.3, 0.3];

/// Interleave positions, normals and texture coordinates into vertices.
///
/// Attributes the importer did not provide stay at zero; missing texture
/// coordinates default to (0, 0).
pub fn build_vertices(mesh: &SceneMesh) -> Vec<ModelVertex> {
    (0..mesh.positions.len())
        .map(|i| ModelVertex {
            position: mesh.positions[i],
            normal: mesh.normals.get(i).copied().unwrap_or([0.0; 3]),
            tex_coords: mesh.tex_coords.get(i).copied().unwrap_or([0.0; 2]),
        })
        .collect()
}

/// Post-triangulation invariant: indices come in triangles and stay in range.
pub fn indices_are_valid(mesh: &SceneMesh) -> bool {
    mesh.indices.len() % 3 == 0
        && mesh
            .indices
            .iter()
            .all(|&index| (index as usize) < mesh.positions.len())
}

/// Material values with the zero-channel fallbacks and shininess clamp
/// applied.
///
/// A channel whose magnitude is exactly zero is treated as unauthored and
/// replaced by its fixed fallback; anything nonzero passes through untouched.
pub fn extract_material(material: &SceneMaterial) -> MaterialProperties {
    let filled = |channel: [f32; 3], fallback: [f32; 3]| {
        if Vector3::from(channel).magnitude() == 0.0 {
            fallback
        } else {
            channel
        }
    };
    MaterialProperties {
        ambient: filled(material.ambient, AMBIENT_FALLBACK),
        diffuse: filled(material.diffuse, DIFFUSE_FALLBACK),
        specular: filled(material.specular, SPECULAR_FALLBACK),
        shininess: if material.shininess < 0.0 {
            1.0
        } else {
            material.shininess
        },
    }
}

/// Fold one processed mesh's material into the model-level aggregate.
pub fn fold_material(
    policy: MaterialPolicy,
    aggregated: &mut MaterialProperties,
    seen: &mut bool,
    incoming: MaterialProperties,
) {
    match policy {
        MaterialPolicy::LastMeshWins => {
            *aggregated = incoming;
            *seen = true;
        }
        MaterialPolicy::FirstMeshWins => {
            if !*seen {
                *aggregated = incoming;
                *seen = true;
            }
        }
    }
}

/// Walk the scene depth-first and upload every reachable mesh.
///
/// Meshes violating the triangle invariant are skipped with a warning rather
/// than failing the whole load. The model-level material is folded according
/// to `settings.material_policy`.
pub fn from_scene(
    scene: &SceneData,
    dir: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    settings: &LoadSettings,
) -> Result<Model, ImportError> {
    let layout = material_texture_layout(device);
    let placeholders = SlotDefaults::new(device, queue);
    let mut cache = TextureCache::new();

    let mut meshes = Vec::new();
    let mut material = MaterialProperties::default();
    let mut material_seen = false;

    for mesh_index in scene.mesh_draw_order() {
        let scene_mesh = &scene.meshes[mesh_index];
        if !indices_are_valid(scene_mesh) {
            warn!(
                "mesh {} in {} violates the triangle index invariant, skipping it",
                scene_mesh.name, scene.name
            );
            continue;
        }
        let vertices = build_vertices(scene_mesh);

        let mut bindings = Vec::new();
        let scene_material = scene_mesh
            .material
            .and_then(|index| scene.materials.get(index));
        if let Some(scene_material) = scene_material {
            for kind in TextureKind::ALL {
                for (i, path) in scene_material.texture_paths(kind).iter().enumerate() {
                    let texture = if settings.strict_textures {
                        cache.load(device, queue, dir, path, kind)?
                    } else {
                        cache.load_or_placeholder(device, queue, dir, path, kind, &placeholders)
                    };
                    bindings.push(TextureBinding {
                        kind,
                        path: path.clone(),
                        uniform_name: kind.shader_name(i as u32 + 1),
                        texture,
                    });
                }
            }
            fold_material(
                settings.material_policy,
                &mut material,
                &mut material_seen,
                extract_material(scene_material),
            );
        }

        meshes.push(Mesh::new(
            device,
            &scene_mesh.name,
            &vertices,
            &scene_mesh.indices,
            bindings,
            &placeholders,
            &layout,
        ));
    }

    Ok(Model { meshes, material })
}
