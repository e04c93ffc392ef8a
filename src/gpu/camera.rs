//! Orbit camera looking at the tree.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Camera data shared by both render passes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// World-space eye position, `w` unused.
    pub eye: [f32; 4],
}

/// Orbit camera circling the tree axis.
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Yaw drift in rad/s when the user is not dragging.
    pub auto_rotate: f32,
}

impl Camera {
    /// Frame a tree of the given height from slightly above its middle.
    pub fn for_tree(height: f32, auto_rotate: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.15,
            distance: height * 2.2,
            target: Vec3::new(0.0, height * 0.45, 0.0),
            auto_rotate,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(45.0_f32.to_radians(), aspect, 0.1, 200.0)
    }

    /// Orbit by a mouse drag delta in pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(-1.2, 1.4);
    }

    /// Dolly by scroll lines.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance - lines * 1.2).clamp(4.0, 80.0);
    }

    /// Advance the idle rotation.
    pub fn spin(&mut self, delta: f32) {
        self.yaw += self.auto_rotate * delta;
    }

    pub fn uniforms(&self, aspect: f32) -> CameraUniforms {
        CameraUniforms {
            view: self.view_matrix().to_cols_array_2d(),
            proj: self.projection(aspect).to_cols_array_2d(),
            eye: self.position().extend(1.0).to_array(),
        }
    }
}
