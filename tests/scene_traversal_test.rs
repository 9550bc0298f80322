use modelview::data_structures::scene::{SceneData, SceneNode, TextureKind};

use crate::common::test_utils::{flat_scene, quad_mesh};

mod common;

#[test]
fn should_order_meshes_depth_first_with_children_in_order() {
    // root (mesh 0) -> [a (meshes 1, 2), b (mesh 3 -> c (mesh 4))]
    let scene = SceneData {
        name: "traversal".to_string(),
        nodes: vec![
            SceneNode {
                name: "root".to_string(),
                meshes: vec![0],
                children: vec![1, 2],
            },
            SceneNode {
                name: "a".to_string(),
                meshes: vec![1, 2],
                children: Vec::new(),
            },
            SceneNode {
                name: "b".to_string(),
                meshes: vec![3],
                children: vec![3],
            },
            SceneNode {
                name: "c".to_string(),
                meshes: vec![4],
                children: Vec::new(),
            },
        ],
        meshes: (0..5).map(|i| quad_mesh(&format!("m{i}"), None)).collect(),
        materials: Vec::new(),
        root: Some(0),
    };

    assert_eq!(scene.mesh_draw_order(), vec![0, 1, 2, 3, 4]);
    assert_eq!(scene.reachable_mesh_count(), scene.meshes.len());
}

#[test]
fn should_count_meshes_at_root_and_child_nodes() {
    let mut scene = flat_scene(vec![quad_mesh("root mesh", None)], Vec::new());
    scene.meshes.push(quad_mesh("child mesh", None));
    scene.nodes.push(SceneNode {
        name: "child".to_string(),
        meshes: vec![1],
        children: Vec::new(),
    });
    scene.nodes[0].children.push(1);

    assert_eq!(scene.reachable_mesh_count(), 2);
    assert_eq!(scene.mesh_draw_order(), vec![0, 1]);
}

#[test]
fn should_terminate_on_cyclic_node_links() {
    // Importers guarantee acyclic graphs; a malformed file must still not
    // hang the traversal.
    let mut scene = flat_scene(vec![quad_mesh("m", None)], Vec::new());
    scene.nodes[0].children.push(0);

    assert_eq!(scene.mesh_draw_order(), vec![0]);
}

#[test]
fn should_skip_out_of_range_node_and_mesh_indices() {
    let mut scene = flat_scene(vec![quad_mesh("m", None)], Vec::new());
    scene.nodes[0].children.push(7);
    scene.nodes[0].meshes.push(9);

    assert_eq!(scene.mesh_draw_order(), vec![0]);
}

#[test]
fn should_yield_nothing_without_a_root() {
    let mut scene = flat_scene(vec![quad_mesh("m", None)], Vec::new());
    scene.root = None;

    assert!(scene.mesh_draw_order().is_empty());
}

#[test]
fn should_number_shader_names_per_kind() {
    assert_eq!(TextureKind::Diffuse.shader_name(1), "texture_diffuse1");
    assert_eq!(TextureKind::Diffuse.shader_name(2), "texture_diffuse2");
    assert_eq!(TextureKind::Specular.shader_name(1), "texture_specular1");
    assert_eq!(TextureKind::Normal.shader_name(3), "texture_normal3");
    assert_eq!(TextureKind::Height.shader_name(1), "texture_height1");
}
