//! Single-purpose 2-D transform matrices.
//!
//! Rotation and scaling are 2x2 and are applied by left-multiplying a 2xN
//! point set. Translation is a 2xN matrix added element-wise to the point set,
//! since points are not stored in homogeneous coordinates.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use std::ops::Deref;

/// Counter-clockwise rotation by `theta` radians.
#[derive(Clone, Debug)]
pub struct RotationMatrix(Matrix);

impl RotationMatrix {
  pub fn new(theta: f64) -> Self {
    let (sin, cos) = theta.sin_cos();
    Self(Matrix::from_2x2([[cos, -sin], [sin, cos]]))
  }
}

/// Uniform scale by `c` on both axes.
#[derive(Clone, Debug)]
pub struct ScalingMatrix(Matrix);

impl ScalingMatrix {
  pub fn new(c: f64) -> Self {
    Self(Matrix::from_2x2([[c, 0.0], [0.0, c]]))
  }
}

/// Shift of `(dx, dy)` repeated across `cols` points.
#[derive(Clone, Debug)]
pub struct TranslationMatrix(Matrix);

impl TranslationMatrix {
  pub fn new(dx: f64, dy: f64, cols: usize) -> Result<Self> {
    if cols == 0 {
      return Err(Error::InvalidArgument(
        "translation needs at least one column".to_string(),
      ));
    }
    let mut m = Matrix::new(2, cols)?;
    for j in 0..cols {
      *m.at_mut(0, j) = dx;
      *m.at_mut(1, j) = dy;
    }
    Ok(Self(m))
  }
}

macro_rules! matrix_newtype {
  ($($name:ident),*) => {
    $(
      impl Deref for $name {
        type Target = Matrix;

        fn deref(&self) -> &Matrix {
          &self.0
        }
      }

      impl From<$name> for Matrix {
        fn from(m: $name) -> Matrix {
          m.0
        }
      }
    )*
  };
}

matrix_newtype!(RotationMatrix, ScalingMatrix, TranslationMatrix);
