//! Importer-neutral scene data.
//!
//! The loaders in [`crate::resources`] lower tobj/gltf output into these plain
//! data types before anything touches the GPU. Keeping an intermediate form
//! means the node traversal, vertex assembly and material rules can be tested
//! without a graphics device, and both importers share one upload path.

use log::warn;

/// Semantic slot a texture is bound to.
///
/// The `Normal` slot is fed from the importer's height/bump channel and the
/// `Height` slot from the ambient channel. OBJ bump maps historically land in
/// the bump field while actually containing normal data, so the crossed wiring
/// is load-bearing for existing assets and is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
    Normal,
    Height,
}

impl TextureKind {
    /// All slots, in the order materials are scanned.
    pub const ALL: [TextureKind; 4] = [
        TextureKind::Diffuse,
        TextureKind::Specular,
        TextureKind::Normal,
        TextureKind::Height,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextureKind::Diffuse => "diffuse",
            TextureKind::Specular => "specular",
            TextureKind::Normal => "normal",
            TextureKind::Height => "height",
        }
    }

    /// Shader-side name for the `index`-th texture of this kind (1-based),
    /// e.g. `texture_diffuse2` for the second diffuse map.
    pub fn shader_name(&self, index: u32) -> String {
        format!("texture_{}{}", self.as_str(), index)
    }
}

/// One node of the imported hierarchy. Indices point into
/// [`SceneData::meshes`] and [`SceneData::nodes`].
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    pub name: String,
    pub meshes: Vec<usize>,
    pub children: Vec<usize>,
}

/// Raw geometry of one importer-native mesh.
///
/// `normals` and `tex_coords` may be empty when the source provides none;
/// conversion zero-fills the missing attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub material: Option<usize>,
}

/// Material values and texture paths as reported by the importer, before the
/// zero-channel fallbacks are applied.
#[derive(Debug, Clone, Default)]
pub struct SceneMaterial {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub diffuse_textures: Vec<String>,
    pub specular_textures: Vec<String>,
    pub normal_textures: Vec<String>,
    pub height_textures: Vec<String>,
}

impl SceneMaterial {
    /// Texture paths attached to the given slot, in declaration order.
    pub fn texture_paths(&self, kind: TextureKind) -> &[String] {
        match kind {
            TextureKind::Diffuse => &self.diffuse_textures,
            TextureKind::Specular => &self.specular_textures,
            TextureKind::Normal => &self.normal_textures,
            TextureKind::Height => &self.height_textures,
        }
    }
}

/// A full imported scene: node hierarchy plus mesh and material pools.
#[derive(Debug, Clone, Default)]
pub struct SceneData {
    pub name: String,
    pub nodes: Vec<SceneNode>,
    pub meshes: Vec<SceneMesh>,
    pub materials: Vec<SceneMaterial>,
    pub root: Option<usize>,
}

impl SceneData {
    /// Mesh indices in draw order: depth-first from the root, a node's meshes
    /// before its children, children in their given order.
    ///
    /// Uses an explicit work stack rather than recursion, so a hostile file
    /// with a deep hierarchy cannot blow the call stack. Node indices that
    /// are out of range or would be visited twice are skipped with a warning;
    /// the importers never produce them, but a truncated file might.
    pub fn mesh_draw_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.meshes.len());
        let root = match self.root {
            Some(root) => root,
            None => return order,
        };

        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            let node = match self.nodes.get(index) {
                Some(node) if !visited[index] => node,
                _ => {
                    warn!("scene {}: skipping repeated or invalid node index {}", self.name, index);
                    continue;
                }
            };
            visited[index] = true;
            for &mesh in &node.meshes {
                if mesh < self.meshes.len() {
                    order.push(mesh);
                } else {
                    warn!("scene {}: node {} references missing mesh {}", self.name, index, mesh);
                }
            }
            // Popping reversed children keeps the depth-first order stable.
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// Total number of meshes reachable from the root.
    pub fn reachable_mesh_count(&self) -> usize {
        self.mesh_draw_order().len()
    }
}
