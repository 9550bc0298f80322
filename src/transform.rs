//! Model-transform stack.
//!
//! Replaces the manual push/pop discipline of fixed-function matrix stacks
//! with a scope guard: [`MatrixStack::scope`] pushes a copy of the current
//! matrix and pops it when the guard drops, so early returns cannot leave
//! the stack unbalanced and corrupt later frames.

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};

#[derive(Debug)]
pub struct MatrixStack {
    stack: Vec<Matrix4<f32>>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Matrix4::identity()],
        }
    }

    /// The current (topmost) model matrix.
    pub fn current(&self) -> Matrix4<f32> {
        *self.stack.last().expect("matrix stack base frame is never popped")
    }

    /// Number of frames on the stack, for balance checks.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.apply(Matrix4::from_translation(Vector3::new(x, y, z)));
    }

    pub fn rotate(&mut self, angle: Deg<f32>, axis: Vector3<f32>) {
        self.apply(Matrix4::from_axis_angle(axis, angle));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.apply(Matrix4::from_nonuniform_scale(x, y, z));
    }

    fn apply(&mut self, matrix: Matrix4<f32>) {
        let top = self.stack.last_mut().expect("matrix stack base frame is never popped");
        *top = *top * matrix;
    }

    /// Push a copy of the current matrix and return a guard that pops it on
    /// drop. Transformations applied through the guard affect only the new
    /// frame.
    pub fn scope(&mut self) -> StackScope<'_> {
        self.stack.push(self.current());
        StackScope { stack: self }
    }
}

/// Guard over one pushed frame of a [`MatrixStack`].
#[derive(Debug)]
pub struct StackScope<'a> {
    stack: &'a mut MatrixStack,
}

impl Drop for StackScope<'_> {
    fn drop(&mut self) {
        self.stack.stack.pop();
    }
}

impl std::ops::Deref for StackScope<'_> {
    type Target = MatrixStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl std::ops::DerefMut for StackScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}
