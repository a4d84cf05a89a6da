pub mod behavior;
pub mod camera;
pub mod color;
pub mod draw;
pub mod error;
pub mod initialize;
pub mod matrix;
pub mod particle;
pub mod plane;
pub mod render;
pub mod state;
pub mod swarm;
pub mod transform;

pub use crate::color::Color;
pub use crate::error::{Error, Result};

/// Shared tuning for every particle kind; the falling kind uses it as-is.
#[derive(Copy, Clone, Debug)]
pub struct ParticleParams {
  pub ttl: f64,
  pub gravity: f64,
  pub scale_multiplier: f64,
  pub min_radius: f64,
  pub max_radius: f64,
  pub min_speed: f64,
  pub max_speed: f64,
  pub center_color: Color,
  pub rim_alpha: u8,
  pub brightness_floor: u16,
}

impl Default for ParticleParams {
  fn default() -> Self {
    Self {
      ttl: 5.0,
      gravity: 1000.0,
      scale_multiplier: 0.999,
      min_radius: 20.0,
      max_radius: 80.0,
      min_speed: 100.0,
      max_speed: 500.0,
      center_color: Color::rgba(150, 150, 150, 100),
      rim_alpha: 150,
      brightness_floor: 40,
    }
  }
}

/// No gravity and no resizing, slow downward drift.
#[derive(Copy, Clone, Debug)]
pub struct ConstantParams {
  pub ttl: f64,
  pub min_vx: f64,
  pub max_vx: f64,
  pub min_vy: f64,
  pub max_vy: f64,
  pub color: Option<Color>,
}

impl Default for ConstantParams {
  fn default() -> Self {
    Self {
      ttl: 10.0,
      min_vx: -100.0,
      max_vx: 100.0,
      min_vy: -150.0,
      max_vy: -50.0,
      color: Some(Color::GREEN),
    }
  }
}

/// Lateral oscillation layered over a constant drift. A zero width disables
/// that axis. `speed` is added to the wave velocity once per frame.
#[derive(Copy, Clone, Debug)]
pub struct WaveParams {
  pub width_x: f64,
  pub width_y: f64,
  pub speed: f64,
  pub color: Option<Color>,
}

impl Default for WaveParams {
  fn default() -> Self {
    Self {
      width_x: 15000.0,
      width_y: 0.0,
      speed: 10.0,
      color: None,
    }
  }
}

#[derive(Copy, Clone, Debug)]
pub struct GrowParams {
  pub growth_rate: f64,
  pub max_growth: f64,
  pub gravity_factor: f64,
}

impl Default for GrowParams {
  fn default() -> Self {
    Self {
      growth_rate: 1.01,
      max_growth: 0.3,
      gravity_factor: 0.5,
    }
  }
}

#[derive(Copy, Clone, Debug)]
pub struct PlaygroundParams {
  pub width: u32,
  pub height: u32,
  pub burst: u32,
  pub min_points: usize,
  pub max_points: usize,
  pub seed: Option<u64>,
  pub particle: ParticleParams,
  pub constant: ConstantParams,
  pub wave: WaveParams,
  pub grow: GrowParams,
}

impl Default for PlaygroundParams {
  fn default() -> Self {
    Self {
      width: 1920,
      height: 1080,
      burst: 5,
      min_points: 25,
      max_points: 50,
      seed: None,
      particle: ParticleParams::default(),
      constant: ConstantParams::default(),
      wave: WaveParams::default(),
      grow: GrowParams::default(),
    }
  }
}

/// One corner of a triangle in window pixels.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
  pub position: [f32; 2],
  pub color: [f32; 4],
}
