use std::{
    fs,
    path::{Path, PathBuf},
};

use futures::executor::block_on;
use modelview::resources::{ImportError, LoadSettings, load_scene_obj};

const OBJ_FIXTURE: &str = "\
mtllib fixture.mtl
o quad
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
usemtl checker
f 1/1/1 2/2/1 3/3/1 4/4/1
";

const MTL_FIXTURE: &str = "\
newmtl checker
Ka 0.0 0.0 0.0
Kd 0.5 0.5 0.5
Ks 0.0 0.0 1.0
Ns 32.0
map_Kd diffuse.png
map_Ks specular.png
map_Bump bump.png
map_Ka occlusion.png
";

fn write_fixture(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("modelview-{test_name}"));
    fs::create_dir_all(&dir).expect("failed to create fixture dir");
    fs::write(dir.join("fixture.mtl"), MTL_FIXTURE).expect("failed to write mtl fixture");
    let obj_path = dir.join("fixture.obj");
    fs::write(&obj_path, OBJ_FIXTURE).expect("failed to write obj fixture");
    obj_path
}

#[test]
fn should_triangulate_and_unify_indices() {
    let path = write_fixture("triangulate");
    let scene = block_on(load_scene_obj(&path, &LoadSettings::default())).unwrap();

    assert_eq!(scene.meshes.len(), 1);
    let mesh = &scene.meshes[0];
    assert_eq!(mesh.positions.len(), 4);
    assert_eq!(mesh.indices.len() % 3, 0);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
    assert_eq!(mesh.material, Some(0));
}

#[test]
fn should_hang_all_meshes_off_a_single_root() {
    let path = write_fixture("root");
    let scene = block_on(load_scene_obj(&path, &LoadSettings::default())).unwrap();

    assert_eq!(scene.root, Some(0));
    assert_eq!(scene.nodes.len(), 1);
    assert_eq!(scene.mesh_draw_order(), vec![0]);
}

#[test]
fn should_flip_the_v_axis_by_default() {
    let path = write_fixture("flip-v");
    let flipped = block_on(load_scene_obj(&path, &LoadSettings::default())).unwrap();
    let unflipped = block_on(load_scene_obj(
        &path,
        &LoadSettings {
            flip_v: false,
            ..Default::default()
        },
    ))
    .unwrap();

    let v_of = |scene: &modelview::data_structures::scene::SceneData, index: usize| {
        scene.meshes[0].tex_coords[index][1]
    };
    for index in 0..4 {
        assert_eq!(v_of(&flipped, index), 1.0 - v_of(&unflipped, index));
    }
}

#[test]
fn should_route_bump_and_ambient_maps_to_normal_and_height_slots() {
    let path = write_fixture("slots");
    let scene = block_on(load_scene_obj(&path, &LoadSettings::default())).unwrap();

    let material = &scene.materials[0];
    assert_eq!(material.diffuse_textures, vec!["diffuse.png"]);
    assert_eq!(material.specular_textures, vec!["specular.png"]);
    assert_eq!(material.normal_textures, vec!["bump.png"]);
    assert_eq!(material.height_textures, vec!["occlusion.png"]);
    assert_eq!(material.shininess, 32.0);
    assert_eq!(material.diffuse, [0.5, 0.5, 0.5]);
}

#[test]
fn should_import_the_same_file_identically_twice() {
    let path = write_fixture("determinism");
    let first = block_on(load_scene_obj(&path, &LoadSettings::default())).unwrap();
    let second = block_on(load_scene_obj(&path, &LoadSettings::default())).unwrap();

    assert_eq!(first.meshes, second.meshes);
}

#[test]
fn should_report_a_missing_file_as_unreadable() {
    let result = block_on(load_scene_obj(
        Path::new("does/not/exist.obj"),
        &LoadSettings::default(),
    ));
    assert!(matches!(result, Err(ImportError::Unreadable { .. })));
}
