//! Viewer state and camera matrices.
//!
//! The view matrix is the classic right-handed look-at built as a rotation
//! times a translation; the projection is a GL-convention perspective matrix
//! remapped to WGPU's clip space by [`OPENGL_TO_WGPU_MATRIX`].

use std::time::Duration;

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Quaternion, Rotation, Rotation3, Vector3, Vector4};
use winit::event::{MouseScrollDelta, WindowEvent};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Right-handed look-at matrix, assembled as rotation * translation.
pub fn look_at(eye: Point3<f32>, look: Point3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    let zaxis = (eye - look).normalize();
    let xaxis = up.cross(zaxis).normalize();
    let yaxis = zaxis.cross(xaxis).normalize();

    let rotation = Matrix4::from_cols(
        Vector4::new(xaxis.x, yaxis.x, zaxis.x, 0.0),
        Vector4::new(xaxis.y, yaxis.y, zaxis.y, 0.0),
        Vector4::new(xaxis.z, yaxis.z, zaxis.z, 0.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    );
    let translation = Matrix4::from_cols(
        Vector4::new(1.0, 0.0, 0.0, 0.0),
        Vector4::new(0.0, 1.0, 0.0, 0.0),
        Vector4::new(0.0, 0.0, 1.0, 0.0),
        Vector4::new(-eye.x, -eye.y, -eye.z, 1.0),
    );

    rotation * translation
}

/// GL-convention perspective matrix (z mapped to [-1, 1], w = -z).
pub fn perspective(fovy: Deg<f32>, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let tan_half_fov = 1.0 / (cgmath::Rad::from(fovy).0 / 2.0).tan();

    let a = -(near + far) / (far - near);
    let b = -(2.0 * near * far) / (far - near);

    Matrix4::from_cols(
        Vector4::new(tan_half_fov / aspect, 0.0, 0.0, 0.0),
        Vector4::new(0.0, tan_half_fov, 0.0, 0.0),
        Vector4::new(0.0, 0.0, a, -1.0),
        Vector4::new(0.0, 0.0, b, 0.0),
    )
}

/// The viewer: eye/look/up vectors plus the projection parameters.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    eye: Point3<f32>,
    look: Point3<f32>,
    up: Vector3<f32>,
    fovy: Deg<f32>,
    aspect: f32,
    znear: f32,
    zfar: f32,
}

impl Viewer {
    pub fn new<E, L, U>(eye: E, look: L, up: U, fovy: Deg<f32>, aspect: f32) -> Self
    where
        E: Into<Point3<f32>>,
        L: Into<Point3<f32>>,
        U: Into<Vector3<f32>>,
    {
        Self {
            eye: eye.into(),
            look: look.into(),
            up: up.into(),
            fovy,
            aspect,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn eye(&self) -> Point3<f32> {
        self.eye
    }

    pub fn look(&self) -> Point3<f32> {
        self.look
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        look_at(self.eye, self.look, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    fn orbit(&mut self, yaw: Deg<f32>, pitch: Deg<f32>) {
        let mut offset = self.eye - self.look;
        offset = Quaternion::from_axis_angle(Vector3::unit_y(), yaw).rotate_vector(offset);

        let right = offset.cross(self.up);
        if right.magnitude() > f32::EPSILON {
            let pitched =
                Quaternion::from_axis_angle(right.normalize(), pitch).rotate_vector(offset);
            // Stop short of the poles so the up vector stays meaningful.
            if pitched.normalize().dot(self.up.normalize()).abs() < 0.99 {
                offset = pitched;
            }
        }
        self.eye = self.look + offset;
    }

    fn zoom(&mut self, amount: f32) {
        let offset = self.eye - self.look;
        let distance = (offset.magnitude() - amount).max(1.0);
        self.eye = self.look + offset.normalize() * distance;
    }
}

/// Accumulates input deltas and applies them to the viewer once per frame.
#[derive(Debug)]
pub struct CameraController {
    speed: f32,
    sensitivity: f32,
    rotate_horizontal: f32,
    rotate_vertical: f32,
    scroll: f32,
}

impl CameraController {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            speed,
            sensitivity,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            scroll: 0.0,
        }
    }

    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        self.rotate_horizontal += dx as f32;
        self.rotate_vertical += dy as f32;
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        if let WindowEvent::MouseWheel { delta, .. } = event {
            self.scroll += match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(position) => position.y as f32 / 20.0,
            };
        }
    }

    pub fn update(&mut self, viewer: &mut Viewer, dt: Duration) {
        let dt = dt.as_secs_f32().min(0.1);
        viewer.orbit(
            Deg(-self.rotate_horizontal * self.sensitivity * dt),
            Deg(-self.rotate_vertical * self.sensitivity * dt),
        );
        if self.scroll != 0.0 {
            viewer.zoom(self.scroll * self.speed * dt);
        }
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
        self.scroll = 0.0;
    }
}
