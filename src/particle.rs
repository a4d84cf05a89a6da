//! The shape every particle kind is built on: a 2xN point set in Cartesian
//! space together with its motion state and lifetime.
//!
//! Rotation and scaling pivot on the particle's own centre by shifting the
//! point set to the origin, left-multiplying, and shifting back.

use crate::draw::{Drawable, TriangleFan};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::plane::CartesianPlane;
use crate::transform::{RotationMatrix, ScalingMatrix, TranslationMatrix};
use crate::{Color, ParticleParams, Vertex};
use cgmath::{Point2, Vector2};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::f64::consts::{FRAC_PI_2, PI};

/// Scale multipliers this close to 1.0 leave the size alone.
pub(crate) const UNIT_SCALE_EPSILON: f64 = 1e-6;

/// What the caller decides about a new particle; everything left `None` is
/// randomised.
#[derive(Copy, Clone, Debug)]
pub struct Shape {
  pub num_points: usize,
  pub size: f64,
  pub color: Option<Color>,
  pub velocity: Option<Vector2<f64>>,
}

impl Shape {
  pub fn new(num_points: usize) -> Self {
    Self {
      num_points,
      size: 1.0,
      color: None,
      velocity: None,
    }
  }

  pub fn with_size(mut self, size: f64) -> Self {
    self.size = size;
    self
  }

  pub fn with_color(mut self, color: Color) -> Self {
    self.color = Some(color);
    self
  }

  pub fn with_velocity(mut self, velocity: Vector2<f64>) -> Self {
    self.velocity = Some(velocity);
    self
  }
}

#[derive(Clone, Debug)]
pub struct Body {
  points: Matrix,
  center: Point2<f64>,
  velocity: Vector2<f64>,
  angular_velocity: f64,
  scale_multiplier: f64,
  ttl: f64,
  center_color: Color,
  rim_color: Color,
  num_points: usize,
}

impl Body {
  /// Builds an irregular polygon around the pixel `click`.
  ///
  /// Starting from a random angle in `[0, pi/2)`, each point is placed at a
  /// random radius from the centre and the angle advances by
  /// `2 pi / (num_points - 1)`.
  pub fn new<R: Rng + ?Sized>(
    rng: &mut R,
    plane: &CartesianPlane,
    click: Point2<f64>,
    shape: &Shape,
    params: &ParticleParams,
  ) -> Result<Self> {
    if shape.num_points < 3 {
      return Err(Error::InvalidArgument(format!(
        "a particle needs at least 3 points, got {}",
        shape.num_points
      )));
    }
    if !(shape.size.is_finite() && shape.size > 0.0) {
      return Err(Error::InvalidArgument(format!(
        "particle size must be positive, got {}",
        shape.size
      )));
    }
    let radius = band("radius", params.min_radius, params.max_radius)?;
    let center = plane.pixel_to_coords(click);

    let velocity = match shape.velocity {
      Some(v) => v,
      None => {
        let speed = band("speed", params.min_speed, params.max_speed)?;
        let vx = speed.sample(rng);
        let vx = if rng.gen_bool(0.5) { -vx } else { vx };
        Vector2::new(vx, speed.sample(rng))
      }
    };
    let rim_color = shape
      .color
      .map(|c| c.with_alpha(params.rim_alpha))
      .unwrap_or_else(|| Color::random_bright(rng, params.rim_alpha, params.brightness_floor));

    let mut points = Matrix::new(2, shape.num_points)?;
    let mut theta = Uniform::new(0.0, FRAC_PI_2).sample(rng);
    let d_theta = 2.0 * PI / (shape.num_points - 1) as f64;
    for j in 0..shape.num_points {
      let r = radius.sample(rng) * shape.size;
      let (sin, cos) = theta.sin_cos();
      points[(0, j)] = center.x + r * cos;
      points[(1, j)] = center.y + r * sin;
      theta += d_theta;
    }

    Ok(Self {
      points,
      center,
      velocity,
      angular_velocity: Uniform::new(0.0, PI).sample(rng),
      scale_multiplier: params.scale_multiplier,
      ttl: params.ttl,
      center_color: params.center_color,
      rim_color,
      num_points: shape.num_points,
    })
  }

  pub fn points(&self) -> &Matrix {
    &self.points
  }

  pub fn num_points(&self) -> usize {
    self.num_points
  }

  pub fn center(&self) -> Point2<f64> {
    self.center
  }

  pub fn velocity(&self) -> Vector2<f64> {
    self.velocity
  }

  pub fn set_velocity(&mut self, velocity: Vector2<f64>) {
    self.velocity = velocity;
  }

  pub fn angular_velocity(&self) -> f64 {
    self.angular_velocity
  }

  pub fn set_angular_velocity(&mut self, radians_per_sec: f64) {
    self.angular_velocity = radians_per_sec;
  }

  pub fn scale_multiplier(&self) -> f64 {
    self.scale_multiplier
  }

  pub fn set_scale_multiplier(&mut self, multiplier: f64) {
    self.scale_multiplier = multiplier;
  }

  pub fn ttl(&self) -> f64 {
    self.ttl
  }

  pub fn set_ttl(&mut self, ttl: f64) {
    self.ttl = ttl;
  }

  pub fn is_expired(&self) -> bool {
    self.ttl <= 0.0
  }

  pub fn colors(&self) -> (Color, Color) {
    (self.center_color, self.rim_color)
  }

  /// Rotates counter-clockwise by `theta` radians about the particle centre.
  pub fn rotate(&mut self, theta: f64) -> Result<()> {
    self.about_center(&RotationMatrix::new(theta))
  }

  /// Scales by `c` about the particle centre.
  pub fn scale(&mut self, c: f64) -> Result<()> {
    self.about_center(&ScalingMatrix::new(c))
  }

  /// Shifts every point and the centre by `(dx, dy)`.
  pub fn translate(&mut self, dx: f64, dy: f64) -> Result<()> {
    let t = TranslationMatrix::new(dx, dy, self.points.cols())?;
    self.points = (&*t + &self.points)?;
    self.center.x += dx;
    self.center.y += dy;
    Ok(())
  }

  fn about_center(&mut self, m: &Matrix) -> Result<()> {
    let pivot = self.center;
    self.translate(-pivot.x, -pivot.y)?;
    self.points = (m * &self.points)?;
    self.translate(pivot.x, pivot.y)
  }

  /// Advances the particle by `dt` seconds using its current velocities.
  ///
  /// Kinds adjust velocity or scale multiplier first and then call this.
  pub fn transform_step(&mut self, dt: f64) -> Result<()> {
    self.ttl -= dt;
    self.rotate(self.angular_velocity * dt)?;

    let m = self.scale_multiplier;
    if (m - 1.0).abs() > UNIT_SCALE_EPSILON {
      let factor = if m > 1.0 { m * (1.0 + dt) } else { m * (1.0 - dt) };
      self.scale(factor.max(0.0))?;
    }

    self.translate(self.velocity.x * dt, self.velocity.y * dt)
  }
}

impl Drawable for Body {
  fn fan(&self, plane: &CartesianPlane) -> TriangleFan {
    let to_vertex = |p: Point2<f64>, color: Color| {
      let px = plane.coords_to_pixel(p);
      Vertex {
        position: [px.x as f32, px.y as f32],
        color: color.to_f32(),
      }
    };
    let rim = (0..self.num_points)
      .map(|j| {
        to_vertex(
          Point2::new(self.points[(0, j)], self.points[(1, j)]),
          self.rim_color,
        )
      })
      .collect();
    TriangleFan {
      center: to_vertex(self.center, self.center_color),
      rim,
    }
  }
}

pub(crate) fn band(what: &str, min: f64, max: f64) -> Result<Uniform<f64>> {
  if !(min.is_finite() && max.is_finite() && min <= max) {
    return Err(Error::InvalidArgument(format!(
      "{what} range [{min}, {max}] is empty"
    )));
  }
  Ok(Uniform::new_inclusive(min, max))
}
