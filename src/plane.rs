use cgmath::{Point2, Vector2};

/// Maps between window pixels (origin top-left, Y down) and the Cartesian plane
/// particles live in (origin at the window centre, Y up).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CartesianPlane {
  size: Vector2<f64>,
}

impl CartesianPlane {
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      size: Vector2::new(f64::from(width), f64::from(height)),
    }
  }

  pub fn width(&self) -> f64 {
    self.size.x
  }

  pub fn height(&self) -> f64 {
    self.size.y
  }

  /// Pixel position of the Cartesian origin.
  pub fn center_pixel(&self) -> Point2<f64> {
    Point2::new(self.size.x / 2.0, self.size.y / 2.0)
  }

  pub fn pixel_to_coords(&self, pixel: Point2<f64>) -> Point2<f64> {
    Point2::new(pixel.x - self.size.x / 2.0, self.size.y / 2.0 - pixel.y)
  }

  pub fn coords_to_pixel(&self, coords: Point2<f64>) -> Point2<f64> {
    Point2::new(coords.x + self.size.x / 2.0, self.size.y / 2.0 - coords.y)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn window_centre_is_origin() {
    let plane = CartesianPlane::new(1920, 1080);
    let origin = plane.pixel_to_coords(plane.center_pixel());
    assert_eq!(origin, Point2::new(0.0, 0.0));
  }

  #[test]
  fn y_axis_points_up() {
    let plane = CartesianPlane::new(800, 600);
    let top_left = plane.pixel_to_coords(Point2::new(0.0, 0.0));
    assert_eq!(top_left, Point2::new(-400.0, 300.0));
    let bottom_right = plane.pixel_to_coords(Point2::new(800.0, 600.0));
    assert_eq!(bottom_right, Point2::new(400.0, -300.0));
  }

  #[test]
  fn mapping_is_invertible() {
    let plane = CartesianPlane::new(640, 480);
    let pixel = Point2::new(123.0, 456.0);
    assert_eq!(plane.coords_to_pixel(plane.pixel_to_coords(pixel)), pixel);
  }
}
