use crate::error::{Error, Result};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul};

/// Largest per-element difference two matrices may have and still compare equal.
pub const EQ_TOLERANCE: f64 = 0.001;

/// Dense row-major grid of `f64` with a shape fixed at construction.
#[derive(Clone, Debug)]
pub struct Matrix {
  rows: usize,
  cols: usize,
  data: Vec<f64>,
}

impl Matrix {
  /// Zero-filled `rows x cols` matrix. Both dimensions must be positive.
  pub fn new(rows: usize, cols: usize) -> Result<Self> {
    if rows == 0 || cols == 0 {
      return Err(Error::InvalidArgument(format!(
        "matrix dimensions must be positive, got {rows}x{cols}"
      )));
    }
    Ok(Self {
      rows,
      cols,
      data: vec![0.0; rows * cols],
    })
  }

  /// Builds a matrix from nested rows; every row must have the same length.
  pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
    let cols = rows.first().map_or(0, |r| r.as_ref().len());
    let mut m = Self::new(rows.len(), cols)?;
    for (i, row) in rows.iter().enumerate() {
      let row = row.as_ref();
      if row.len() != cols {
        return Err(Error::InvalidArgument(format!(
          "row {i} has {} entries, expected {cols}",
          row.len()
        )));
      }
      m.data[i * cols..(i + 1) * cols].copy_from_slice(row);
    }
    Ok(m)
  }

  /// 2x2 matrix from its two rows.
  pub fn from_2x2(rows: [[f64; 2]; 2]) -> Self {
    Self {
      rows: 2,
      cols: 2,
      data: rows.concat(),
    }
  }

  pub fn rows(&self) -> usize {
    self.rows
  }

  pub fn cols(&self) -> usize {
    self.cols
  }

  pub fn shape(&self) -> (usize, usize) {
    (self.rows, self.cols)
  }

  /// Reads element `(i, j)`. Panics when out of bounds.
  #[inline]
  pub fn at(&self, i: usize, j: usize) -> f64 {
    self[(i, j)]
  }

  /// Mutable access to element `(i, j)`. Panics when out of bounds.
  #[inline]
  pub fn at_mut(&mut self, i: usize, j: usize) -> &mut f64 {
    &mut self[(i, j)]
  }

  /// One row as a slice.
  pub fn row(&self, i: usize) -> &[f64] {
    assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
    &self.data[i * self.cols..(i + 1) * self.cols]
  }

  #[inline]
  fn offset(&self, i: usize, j: usize) -> usize {
    assert!(
      i < self.rows && j < self.cols,
      "index ({i}, {j}) out of bounds for {}x{} matrix",
      self.rows,
      self.cols
    );
    i * self.cols + j
  }
}

impl Index<(usize, usize)> for Matrix {
  type Output = f64;

  fn index(&self, (i, j): (usize, usize)) -> &f64 {
    &self.data[self.offset(i, j)]
  }
}

impl IndexMut<(usize, usize)> for Matrix {
  fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
    let k = self.offset(i, j);
    &mut self.data[k]
  }
}

impl Add for &Matrix {
  type Output = Result<Matrix>;

  /// Element-wise sum.
  fn add(self, rhs: Self) -> Result<Matrix> {
    if self.shape() != rhs.shape() {
      return Err(Error::DimensionMismatch {
        op: "add",
        left: self.shape(),
        right: rhs.shape(),
      });
    }
    let data = self
      .data
      .iter()
      .zip(&rhs.data)
      .map(|(a, b)| a + b)
      .collect();
    Ok(Matrix {
      rows: self.rows,
      cols: self.cols,
      data,
    })
  }
}

impl Mul for &Matrix {
  type Output = Result<Matrix>;

  /// Matrix product, `rows(self) x cols(rhs)`.
  fn mul(self, rhs: Self) -> Result<Matrix> {
    if self.cols != rhs.rows {
      return Err(Error::DimensionMismatch {
        op: "multiply",
        left: self.shape(),
        right: rhs.shape(),
      });
    }
    let mut out = Matrix::new(self.rows, rhs.cols)?;
    for k in 0..rhs.cols {
      for i in 0..self.rows {
        let mut sum = 0.0f64;
        for j in 0..self.cols {
          sum += self[(i, j)] * rhs[(j, k)];
        }
        out[(i, k)] = sum;
      }
    }
    Ok(out)
  }
}

/// Approximate equality: same shape and every element within [`EQ_TOLERANCE`].
impl PartialEq for Matrix {
  fn eq(&self, other: &Self) -> bool {
    self.shape() == other.shape()
      && self
        .data
        .iter()
        .zip(&other.data)
        .all(|(a, b)| (a - b).abs() <= EQ_TOLERANCE)
  }
}

impl fmt::Display for Matrix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for i in 0..self.rows {
      for (j, v) in self.row(i).iter().enumerate() {
        if j > 0 {
          write!(f, " ")?;
        }
        write!(f, "{v:>10.4}")?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_is_zero_filled() {
    let m = Matrix::new(2, 3).unwrap();
    assert_eq!(m.shape(), (2, 3));
    for i in 0..2 {
      for j in 0..3 {
        assert_eq!(m.at(i, j), 0.0);
      }
    }
  }

  #[test]
  fn zero_dimensions_are_rejected() {
    assert!(matches!(Matrix::new(0, 3), Err(Error::InvalidArgument(_))));
    assert!(matches!(Matrix::new(2, 0), Err(Error::InvalidArgument(_))));
  }

  #[test]
  fn ragged_rows_are_rejected() {
    let rows: [&[f64]; 2] = [&[1.0, 2.0], &[3.0]];
    assert!(matches!(
      Matrix::from_rows(&rows),
      Err(Error::InvalidArgument(_))
    ));
  }

  #[test]
  #[should_panic(expected = "out of bounds")]
  fn out_of_bounds_index_panics() {
    let m = Matrix::new(2, 2).unwrap();
    let _ = m.at(2, 0);
  }

  #[test]
  fn at_mut_writes_through() {
    let mut m = Matrix::new(2, 3).unwrap();
    *m.at_mut(1, 2) = 4.5;
    assert_eq!(m.at(1, 2), 4.5);
    assert_eq!(m.row(1), &[0.0, 0.0, 4.5]);
  }

  #[test]
  fn add_is_element_wise() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    let b = Matrix::from_rows(&[[10.0, 20.0], [30.0, 40.0]]).unwrap();
    let c = (&a + &b).unwrap();
    assert_eq!(c, Matrix::from_rows(&[[11.0, 22.0], [33.0, 44.0]]).unwrap());
  }

  #[test]
  fn add_rejects_mismatched_shapes() {
    let a = Matrix::new(2, 2).unwrap();
    let b = Matrix::new(2, 3).unwrap();
    match &a + &b {
      Err(Error::DimensionMismatch { op, left, right }) => {
        assert_eq!(op, "add");
        assert_eq!(left, (2, 2));
        assert_eq!(right, (2, 3));
      }
      other => panic!("expected dimension mismatch, got {other:?}"),
    }
  }

  #[test]
  fn multiply_matches_hand_computed_product() {
    let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]).unwrap();
    let c = (&a * &b).unwrap();
    assert_eq!(c.shape(), (2, 2));
    assert_eq!(c, Matrix::from_rows(&[[58.0, 64.0], [139.0, 154.0]]).unwrap());
  }

  #[test]
  fn multiply_rejects_inner_dimension_mismatch() {
    let a = Matrix::new(2, 3).unwrap();
    let b = Matrix::new(2, 3).unwrap();
    assert!(matches!(&a * &b, Err(Error::DimensionMismatch { .. })));
  }

  #[test]
  fn equality_tolerates_small_differences() {
    let a = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
    let near = Matrix::from_rows(&[[1.0005, 1.9995]]).unwrap();
    let far = Matrix::from_rows(&[[1.01, 2.0]]).unwrap();
    assert_eq!(a, near);
    assert_ne!(a, far);
    assert_ne!(a, Matrix::new(2, 1).unwrap());
  }

  #[test]
  fn display_separates_columns_and_rows() {
    let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    let text = m.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: Vec<&str> = lines[0].split_whitespace().collect();
    assert_eq!(first, ["1.0000", "2.0000"]);
  }
}
