use modelview::{
    data_structures::scene::SceneMesh,
    resources::mesh::{build_vertices, indices_are_valid},
};

use crate::common::test_utils::quad_mesh;

mod common;

#[test]
fn should_interleave_positions_normals_and_tex_coords() {
    let mesh = quad_mesh("quad", None);
    let vertices = build_vertices(&mesh);

    assert_eq!(vertices.len(), 4);
    assert_eq!(vertices[2].position, [1.0, 1.0, 0.0]);
    assert_eq!(vertices[2].normal, [0.0, 0.0, 1.0]);
    assert_eq!(vertices[2].tex_coords, [1.0, 1.0]);
}

#[test]
fn should_zero_fill_missing_attributes() {
    let mesh = SceneMesh {
        normals: Vec::new(),
        tex_coords: Vec::new(),
        ..quad_mesh("bare", None)
    };
    let vertices = build_vertices(&mesh);

    for vertex in &vertices {
        assert_eq!(vertex.normal, [0.0, 0.0, 0.0]);
        assert_eq!(vertex.tex_coords, [0.0, 0.0]);
    }
}

#[test]
fn should_accept_triangulated_meshes() {
    let mesh = quad_mesh("quad", None);
    assert!(indices_are_valid(&mesh));
    assert_eq!(mesh.indices.len() % 3, 0);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
}

#[test]
fn should_reject_non_triangle_index_counts() {
    let mesh = SceneMesh {
        indices: vec![0, 1, 2, 3],
        ..quad_mesh("broken", None)
    };
    assert!(!indices_are_valid(&mesh));
}

#[test]
fn should_reject_indices_past_the_vertex_range() {
    let mesh = SceneMesh {
        indices: vec![0, 1, 4],
        ..quad_mesh("broken", None)
    };
    assert!(!indices_are_valid(&mesh));
}

#[test]
fn should_convert_deterministically() {
    let mesh = quad_mesh("quad", None);
    assert_eq!(build_vertices(&mesh), build_vertices(&mesh));
}
