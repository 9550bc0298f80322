use cgmath::{Matrix4, Point3, SquareMatrix, Transform};
use modelview::transform::MatrixStack;

#[test]
fn should_start_with_a_single_identity_frame() {
    let stack = MatrixStack::new();
    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.current(), Matrix4::identity());
}

#[test]
fn should_restore_depth_and_matrix_when_a_scope_drops() {
    let mut stack = MatrixStack::new();
    let before = stack.depth();
    {
        let mut frame = stack.scope();
        frame.translate(1.0, 2.0, 3.0);
        assert_ne!(frame.current(), Matrix4::identity());
    }
    assert_eq!(stack.depth(), before);
    assert_eq!(stack.current(), Matrix4::identity());
}

#[test]
fn should_stay_balanced_across_a_frame_of_drawables() {
    let mut stack = MatrixStack::new();
    let before = stack.depth();
    for drawable in 0..5 {
        let mut frame = stack.scope();
        frame.translate(drawable as f32, 0.0, 0.0);
    }
    assert_eq!(stack.depth(), before);
}

#[test]
fn should_stay_balanced_on_early_exit() {
    fn draw_until(stack: &mut MatrixStack, fail_at: usize) -> Result<(), usize> {
        for drawable in 0..4 {
            let mut frame = stack.scope();
            frame.translate(0.0, 1.0, 0.0);
            if drawable == fail_at {
                return Err(drawable);
            }
        }
        Ok(())
    }

    let mut stack = MatrixStack::new();
    let before = stack.depth();
    assert_eq!(draw_until(&mut stack, 2), Err(2));
    assert_eq!(stack.depth(), before);
}

#[test]
fn should_compose_transforms_within_a_scope() {
    let mut stack = MatrixStack::new();
    let mut frame = stack.scope();
    frame.translate(0.0, 1.0, 0.0);
    frame.scale(2.0, 2.0, 2.0);

    let transformed = frame.current().transform_point(Point3::new(1.0, 0.0, 0.0));
    assert_eq!(transformed, Point3::new(2.0, 1.0, 0.0));
}

#[test]
fn should_inherit_the_parent_frame_in_nested_scopes() {
    let mut stack = MatrixStack::new();
    let mut outer = stack.scope();
    outer.translate(5.0, 0.0, 0.0);
    let outer_matrix = outer.current();
    {
        let inner = outer.scope();
        assert_eq!(inner.current(), outer_matrix);
    }
    assert_eq!(outer.current(), outer_matrix);
}
