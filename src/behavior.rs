//! Per-kind update policies layered on [`Body::transform_step`].

use crate::draw::{Drawable, TriangleFan};
use crate::error::Result;
use crate::initialize::ParticleKind;
use crate::particle::{band, Body, Shape, UNIT_SCALE_EPSILON};
use crate::plane::CartesianPlane;
use crate::{ConstantParams, GrowParams, ParticleParams, WaveParams};
use cgmath::{Point2, Vector2};
use rand::Rng;
use rand_distr::Distribution;

/// One axis of a wave: velocity is pushed towards the current direction every
/// frame and the direction flips once the travelled distance leaves
/// `[-width, width]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WaveAxis {
  pub width: f64,
  pub velocity: f64,
  pub displacement: f64,
  pub rising: bool,
}

impl WaveAxis {
  fn new(width: f64, rising: bool) -> Self {
    Self {
      width,
      velocity: 0.0,
      displacement: 0.0,
      rising,
    }
  }

  fn step(&mut self, speed: f64) {
    if self.width == 0.0 {
      return;
    }
    if self.rising {
      self.velocity += speed;
    } else {
      self.velocity -= speed;
    }
    self.displacement += self.velocity;
    if self.displacement > self.width {
      self.rising = false;
    } else if self.displacement < -self.width {
      self.rising = true;
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Wave {
  pub x: WaveAxis,
  pub y: WaveAxis,
  pub speed: f64,
  /// Drift the wave oscillates around.
  pub baseline: Vector2<f64>,
}

impl Wave {
  /// Advances both axes and returns the velocity to move with this frame.
  fn step(&mut self) -> Vector2<f64> {
    self.x.step(self.speed);
    self.y.step(self.speed);
    self.baseline + Vector2::new(self.x.velocity, self.y.velocity)
  }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grow {
  pub grown: f64,
  pub max_growth: f64,
  pub gravity: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Motion {
  /// Accumulating gravity and a shrinking scale multiplier.
  Falling { gravity: f64 },
  /// Straight-line drift, fixed size.
  Constant,
  Wave(Wave),
  /// Grows until `max_growth` is reached, then falls under reduced gravity.
  Grow(Grow),
}

#[derive(Clone, Debug)]
pub struct Particle {
  body: Body,
  motion: Motion,
}

impl Particle {
  /// Falls under gravity while shrinking.
  pub fn falling<R: Rng + ?Sized>(
    rng: &mut R,
    plane: &CartesianPlane,
    click: Point2<f64>,
    shape: &Shape,
    params: &ParticleParams,
  ) -> Result<Self> {
    let body = Body::new(rng, plane, click, shape, params)?;
    Ok(Self {
      body,
      motion: Motion::Falling {
        gravity: params.gravity,
      },
    })
  }

  pub fn constant<R: Rng + ?Sized>(
    rng: &mut R,
    plane: &CartesianPlane,
    click: Point2<f64>,
    shape: &Shape,
    params: &ParticleParams,
    constant: &ConstantParams,
  ) -> Result<Self> {
    let body = constant_body(rng, plane, click, shape, params, constant)?;
    Ok(Self {
      body,
      motion: Motion::Constant,
    })
  }

  /// A constant particle whose velocity also swings back and forth.
  #[allow(clippy::too_many_arguments)]
  pub fn wave<R: Rng + ?Sized>(
    rng: &mut R,
    plane: &CartesianPlane,
    click: Point2<f64>,
    shape: &Shape,
    params: &ParticleParams,
    constant: &ConstantParams,
    wave: &WaveParams,
  ) -> Result<Self> {
    let shape = match (shape.color, wave.color) {
      (None, Some(c)) => shape.with_color(c),
      _ => *shape,
    };
    let constant = ConstantParams {
      color: None,
      ..*constant
    };
    let body = constant_body(rng, plane, click, &shape, params, &constant)?;
    let motion = Motion::Wave(Wave {
      x: WaveAxis::new(wave.width_x, rng.gen()),
      y: WaveAxis::new(wave.width_y, rng.gen()),
      speed: wave.speed,
      baseline: body.velocity(),
    });
    Ok(Self { body, motion })
  }

  pub fn grow<R: Rng + ?Sized>(
    rng: &mut R,
    plane: &CartesianPlane,
    click: Point2<f64>,
    shape: &Shape,
    params: &ParticleParams,
    grow: &GrowParams,
  ) -> Result<Self> {
    let mut body = Body::new(rng, plane, click, shape, params)?;
    body.set_scale_multiplier(grow.growth_rate);
    Ok(Self {
      body,
      motion: Motion::Grow(Grow {
        grown: 0.0,
        max_growth: grow.max_growth,
        gravity: params.gravity * grow.gravity_factor,
      }),
    })
  }

  pub fn body(&self) -> &Body {
    &self.body
  }

  pub fn motion(&self) -> &Motion {
    &self.motion
  }

  pub fn kind(&self) -> ParticleKind {
    match self.motion {
      Motion::Falling { .. } => ParticleKind::Normal,
      Motion::Constant => ParticleKind::Constant,
      Motion::Wave(_) => ParticleKind::Wave,
      Motion::Grow(_) => ParticleKind::Grow,
    }
  }

  pub fn ttl(&self) -> f64 {
    self.body.ttl()
  }

  pub fn is_expired(&self) -> bool {
    self.body.is_expired()
  }

  /// Applies this kind's velocity policy, then the shared transform step.
  pub fn update(&mut self, dt: f64) -> Result<()> {
    match &mut self.motion {
      Motion::Falling { gravity } => {
        let mut v = self.body.velocity();
        v.y -= *gravity * dt;
        self.body.set_velocity(v);
      }
      Motion::Constant => {}
      Motion::Wave(wave) => {
        self.body.set_velocity(wave.step());
      }
      Motion::Grow(grow) => {
        let mut v = self.body.velocity();
        v.y -= grow.gravity * dt;
        self.body.set_velocity(v);

        let m = self.body.scale_multiplier();
        if (m - 1.0).abs() > UNIT_SCALE_EPSILON {
          grow.grown += m - 1.0;
          if grow.grown >= grow.max_growth {
            self.body.set_scale_multiplier(1.0);
          }
        }
      }
    }
    self.body.transform_step(dt)
  }
}

impl Drawable for Particle {
  fn fan(&self, plane: &CartesianPlane) -> TriangleFan {
    self.body.fan(plane)
  }
}

fn constant_body<R: Rng + ?Sized>(
  rng: &mut R,
  plane: &CartesianPlane,
  click: Point2<f64>,
  shape: &Shape,
  params: &ParticleParams,
  constant: &ConstantParams,
) -> Result<Body> {
  let mut shape = *shape;
  if shape.velocity.is_none() {
    let vx = band("constant x velocity", constant.min_vx, constant.max_vx)?;
    let vy = band("constant y velocity", constant.min_vy, constant.max_vy)?;
    shape.velocity = Some(Vector2::new(vx.sample(rng), vy.sample(rng)));
  }
  if shape.color.is_none() {
    shape.color = constant.color;
  }
  let mut body = Body::new(rng, plane, click, &shape, params)?;
  body.set_scale_multiplier(1.0);
  body.set_ttl(constant.ttl);
  Ok(body)
}
