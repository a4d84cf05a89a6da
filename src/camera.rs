use cgmath::SquareMatrix;
use winit::dpi::PhysicalSize;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Flat camera looking at the window's pixel rectangle, origin top-left.
pub struct Camera {
  pub width: f32,
  pub height: f32,
}

impl Camera {
  pub fn new(size: PhysicalSize<u32>) -> Self {
    Self {
      width: size.width.max(1) as f32,
      height: size.height.max(1) as f32,
    }
  }

  pub fn resize(&mut self, size: PhysicalSize<u32>) {
    *self = Self::new(size);
  }

  fn build_projection_matrix(&self) -> cgmath::Matrix4<f32> {
    // top and bottom swapped so pixel Y grows downwards
    let proj = cgmath::ortho(0.0, self.width, self.height, 0.0, -1.0, 1.0);
    OPENGL_TO_WGPU_MATRIX * proj
  }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
  view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
  pub fn new() -> Self {
    Self {
      view_proj: cgmath::Matrix4::identity().into(),
    }
  }

  pub fn update_view_proj(&mut self, camera: &Camera) {
    self.view_proj = camera.build_projection_matrix().into();
  }
}

impl Default for CameraUniform {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cgmath::{Vector4, Zero};

  fn project(camera: &Camera, x: f32, y: f32) -> Vector4<f32> {
    camera.build_projection_matrix() * Vector4::new(x, y, 0.0, 1.0)
  }

  #[test]
  fn pixel_corners_map_to_clip_corners() {
    let camera = Camera::new(PhysicalSize::new(800, 600));
    let top_left = project(&camera, 0.0, 0.0);
    assert!((top_left.x + 1.0).abs() < 1e-6 && (top_left.y - 1.0).abs() < 1e-6);
    let bottom_right = project(&camera, 800.0, 600.0);
    assert!((bottom_right.x - 1.0).abs() < 1e-6 && (bottom_right.y + 1.0).abs() < 1e-6);
  }

  #[test]
  fn zero_size_is_clamped() {
    let camera = Camera::new(PhysicalSize::new(0, 0));
    assert_eq!((camera.width, camera.height), (1.0, 1.0));
    assert!(!camera.build_projection_matrix().is_zero());
  }
}
