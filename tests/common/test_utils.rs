use modelview::data_structures::scene::{SceneData, SceneMaterial, SceneMesh, SceneNode};

/// A unit quad in the XY plane, already triangulated.
pub(crate) fn quad_mesh(name: &str, material: Option<usize>) -> SceneMesh {
    SceneMesh {
        name: name.to_string(),
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        normals: vec![[0.0, 0.0, 1.0]; 4],
        tex_coords: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        indices: vec![0, 1, 2, 0, 2, 3],
        material,
    }
}

pub(crate) fn plain_material(name: &str) -> SceneMaterial {
    SceneMaterial {
        name: name.to_string(),
        ambient: [0.1, 0.1, 0.1],
        diffuse: [0.5, 0.5, 0.5],
        specular: [0.4, 0.4, 0.4],
        shininess: 32.0,
        ..Default::default()
    }
}

/// A scene with one root node owning all meshes, no children.
pub(crate) fn flat_scene(meshes: Vec<SceneMesh>, materials: Vec<SceneMaterial>) -> SceneData {
    let root = SceneNode {
        name: "root".to_string(),
        meshes: (0..meshes.len()).collect(),
        children: Vec::new(),
    };
    SceneData {
        name: "test scene".to_string(),
        nodes: vec![root],
        meshes,
        materials,
        root: Some(0),
    }
}

/// Headless device and queue for GPU-dependent tests.
#[cfg(feature = "integration-tests")]
pub(crate) async fn create_test_device() -> (wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .expect("no adapter available for integration tests");
    adapter
        .request_device(&wgpu::DeviceDescriptor::default())
        .await
        .expect("failed to create a test device")
}
