use modelview::{
    data_structures::{model::MaterialProperties, scene::SceneMaterial},
    resources::mesh::{MaterialPolicy, extract_material, fold_material},
};

use crate::common::test_utils::plain_material;

mod common;

#[test]
fn should_replace_zero_magnitude_channels_with_fallbacks() {
    let material = SceneMaterial {
        ambient: [0.0, 0.0, 0.0],
        diffuse: [0.0, 0.0, 0.0],
        specular: [0.0, 0.0, 0.0],
        ..plain_material("black")
    };
    let extracted = extract_material(&material);

    assert_eq!(extracted.ambient, [0.2, 0.2, 0.2]);
    assert_eq!(extracted.diffuse, [1.0, 1.0, 1.0]);
    assert_eq!(extracted.specular, [0.3, 0.3, 0.3]);
}

#[test]
fn should_pass_nonzero_channels_through() {
    let material = SceneMaterial {
        // Nonzero magnitude, even with zero components, is authored data.
        specular: [0.0, 0.0, 1.0],
        ..plain_material("blue specular")
    };
    let extracted = extract_material(&material);

    assert_eq!(extracted.specular, [0.0, 0.0, 1.0]);
    assert_eq!(extracted.diffuse, [0.5, 0.5, 0.5]);
}

#[test]
fn should_clamp_negative_shininess_to_one() {
    let material = SceneMaterial {
        shininess: -5.0,
        ..plain_material("negative")
    };
    assert_eq!(extract_material(&material).shininess, 1.0);
}

#[test]
fn should_keep_positive_shininess() {
    let material = plain_material("shiny");
    assert_eq!(extract_material(&material).shininess, 32.0);
}

#[test]
fn should_let_the_last_mesh_win_by_default() {
    let first = extract_material(&plain_material("first"));
    let second = MaterialProperties {
        diffuse: [0.9, 0.1, 0.1],
        ..first
    };

    let mut aggregated = MaterialProperties::default();
    let mut seen = false;
    fold_material(MaterialPolicy::default(), &mut aggregated, &mut seen, first);
    fold_material(MaterialPolicy::default(), &mut aggregated, &mut seen, second);

    assert_eq!(aggregated, second);
}

#[test]
fn should_keep_the_first_mesh_under_first_mesh_wins() {
    let first = extract_material(&plain_material("first"));
    let second = MaterialProperties {
        diffuse: [0.9, 0.1, 0.1],
        ..first
    };

    let mut aggregated = MaterialProperties::default();
    let mut seen = false;
    fold_material(MaterialPolicy::FirstMeshWins, &mut aggregated, &mut seen, first);
    fold_material(MaterialPolicy::FirstMeshWins, &mut aggregated, &mut seen, second);

    assert_eq!(aggregated, first);
}
