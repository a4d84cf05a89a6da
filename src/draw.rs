use crate::plane::CartesianPlane;
use crate::Vertex;

/// Centre vertex plus a ring of rim vertices. Triangles run from the centre
/// to each pair of neighbouring rim vertices, wrapping back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleFan {
  pub center: Vertex,
  pub rim: Vec<Vertex>,
}

impl TriangleFan {
  pub fn triangle_count(&self) -> usize {
    if self.rim.len() < 2 {
      0
    } else {
      self.rim.len()
    }
  }

  /// Appends the fan to `out` as a plain triangle list.
  pub fn append_triangles(&self, out: &mut Vec<Vertex>) {
    let n = self.triangle_count();
    out.reserve(n * 3);
    for i in 0..n {
      out.push(self.center);
      out.push(self.rim[i]);
      out.push(self.rim[(i + 1) % n]);
    }
  }
}

/// Anything that can hand the renderer a fan in window pixels.
pub trait Drawable {
  fn fan(&self, plane: &CartesianPlane) -> TriangleFan;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn vertex(x: f32, y: f32) -> Vertex {
    Vertex {
      position: [x, y],
      color: [1.0; 4],
    }
  }

  #[test]
  fn fan_closes_on_first_rim_vertex() {
    let fan = TriangleFan {
      center: vertex(0.0, 0.0),
      rim: vec![vertex(1.0, 0.0), vertex(0.0, 1.0), vertex(-1.0, 0.0)],
    };
    let mut out = Vec::new();
    fan.append_triangles(&mut out);
    assert_eq!(out.len(), 9);
    assert_eq!(out[6], fan.center);
    assert_eq!(out[7], fan.rim[2]);
    assert_eq!(out[8], fan.rim[0]);
  }

  #[test]
  fn degenerate_fan_emits_nothing() {
    let fan = TriangleFan {
      center: vertex(0.0, 0.0),
      rim: vec![vertex(1.0, 0.0)],
    };
    let mut out = Vec::new();
    fan.append_triangles(&mut out);
    assert!(out.is_empty());
  }
}
