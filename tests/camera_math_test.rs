use cgmath::{Deg, Point3, Transform, Vector3, Vector4};
use modelview::camera::{Viewer, look_at, perspective};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn should_build_a_pure_translation_for_an_axis_aligned_view() {
    let view = look_at(
        Point3::new(0.0, 0.0, 5.0),
        Point3::new(0.0, 0.0, 0.0),
        Vector3::unit_y(),
    );

    let eye_space = view.transform_point(Point3::new(0.0, 0.0, 0.0));
    assert_eq!(eye_space, Point3::new(0.0, 0.0, -5.0));
    // The rotation part is the identity here, so x and y pass through.
    let side = view.transform_point(Point3::new(1.0, 2.0, 0.0));
    assert_eq!(side, Point3::new(1.0, 2.0, -5.0));
}

#[test]
fn should_keep_the_eye_at_the_view_space_origin() {
    let eye = Point3::new(12.0, -3.0, 7.5);
    let view = look_at(eye, Point3::new(0.0, 1.0, 0.0), Vector3::unit_y());

    let origin = view.transform_point(eye);
    assert!(close(origin.x, 0.0) && close(origin.y, 0.0) && close(origin.z, 0.0));
}

#[test]
fn should_match_the_fixed_perspective_convention() {
    let near = 0.1;
    let far = 1000.0;
    let projection = perspective(Deg(45.0), 1.0, near, far);

    let tan_half_fov = 1.0 / (45.0_f32.to_radians() / 2.0).tan();
    assert!(close(projection.x.x, tan_half_fov));
    assert!(close(projection.y.y, tan_half_fov));
    assert!(close(projection.z.z, -(near + far) / (far - near)));
    assert!(close(projection.z.w, -1.0));
    assert!(close(projection.w.z, -(2.0 * near * far) / (far - near)));
    assert!(close(projection.w.w, 0.0));
}

#[test]
fn should_divide_the_horizontal_fov_by_the_aspect_ratio() {
    let square = perspective(Deg(45.0), 1.0, 0.1, 1000.0);
    let wide = perspective(Deg(45.0), 2.0, 0.1, 1000.0);

    assert!(close(wide.x.x, square.x.x / 2.0));
    assert!(close(wide.y.y, square.y.y));
}

#[test]
fn should_map_the_depth_range_to_wgpu_clip_space() {
    let viewer = Viewer::new(
        [0.0, 0.0, 5.0],
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        Deg(45.0),
        1.0,
    );
    let projection = viewer.projection_matrix();

    // znear = 0.1, zfar = 1000 in the viewer defaults.
    let near_clip = projection * Vector4::new(0.0, 0.0, -0.1, 1.0);
    let far_clip = projection * Vector4::new(0.0, 0.0, -1000.0, 1.0);

    assert!(close(near_clip.z / near_clip.w, 0.0));
    assert!(close(far_clip.z / far_clip.w, 1.0));
}

#[test]
fn should_expose_viewer_vectors_and_mutate_aspect() {
    let mut viewer = Viewer::new(
        [50.0, 50.0, 50.0],
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        Deg(45.0),
        4.0 / 3.0,
    );
    assert_eq!(viewer.eye(), Point3::new(50.0, 50.0, 50.0));
    assert_eq!(viewer.look(), Point3::new(0.0, 0.0, 0.0));
    assert_eq!(viewer.up(), Vector3::unit_y());

    let before = viewer.projection_matrix();
    viewer.set_aspect_ratio(16.0 / 9.0);
    let after = viewer.projection_matrix();
    assert!(close(after.x.x, before.x.x * (4.0 / 3.0) / (16.0 / 9.0)));

    // The view matrix does not depend on the projection parameters.
    assert_eq!(
        viewer.view_matrix(),
        look_at(viewer.eye(), viewer.look(), viewer.up())
    );
}
